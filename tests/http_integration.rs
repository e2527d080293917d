// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTP clients and a full run, using wiremock.

use std::collections::HashMap;
use std::time::Duration;

use rainlamp::command::PowerOnCommand;
use rainlamp::types::{Brightness, ColorTemperature, LampSetting, RgbColor};
use rainlamp::weather::TimeSlot;
use rainlamp::{
    DeviceError, DiscordConfig, Error, FetchError, NotifyOutcome, Pipeline, Settings,
    SwitchBotConfig, ValueError, WeatherConfig,
};
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const DEVICE_ID: &str = "6055F92FCFD2";

fn forecast(morning: &str, afternoon: &str, evening: &str) -> serde_json::Value {
    serde_json::json!({
        "publicTime": "2024-04-01T05:00:00+09:00",
        "publishingOffice": "気象庁",
        "title": "東京都 東京 の天気",
        "link": "https://www.jma.go.jp/bosai/forecast/#area_type=offices&area_code=130000",
        "forecasts": [{
            "date": "2024-04-01",
            "dateLabel": "今日",
            "telop": "曇のち雨",
            "detail": { "weather": "くもり 夜 雨" },
            "temperature": {
                "min": { "celsius": "9", "fahrenheit": "48.2" },
                "max": { "celsius": "15", "fahrenheit": "59" }
            },
            "chanceOfRain": {
                "T00_06": "--%",
                "T06_12": morning,
                "T12_18": afternoon,
                "T18_24": evening
            },
            "image": {
                "title": "曇のち雨",
                "url": "https://www.jma.go.jp/bosai/forecast/img/212.svg",
                "width": 80,
                "height": 60
            }
        }],
        "location": { "area": "関東", "prefecture": "東京都", "district": "東京地方", "city": "東京" }
    })
}

fn switchbot_ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "statusCode": 100,
        "body": {},
        "message": "success"
    }))
}

fn commands_path() -> String {
    format!("/v1.1/devices/{DEVICE_ID}/commands")
}

fn command_names(requests: &[Request]) -> Vec<(String, String)> {
    requests
        .iter()
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            (
                body["command"].as_str().unwrap().to_string(),
                body["parameter"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

// ============================================================================
// Weather client
// ============================================================================

mod weather_client {
    use super::*;

    #[tokio::test]
    async fn fetch_today_reduces_slots() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/forecast/city/130010"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast("10%", "55%", "5%")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = WeatherConfig::new()
            .with_base_url(format!("{}/api/forecast/city", mock_server.uri()))
            .into_client()
            .unwrap();

        let summary = client.fetch_today("130010").await.unwrap();
        assert_eq!(summary.max_probability.value(), 55.0);
        assert_eq!(
            summary.slot(TimeSlot::Morning).probability.map(|p| p.value()),
            Some(10.0)
        );
        assert_eq!(summary.headline, "曇のち雨");
        assert_eq!(summary.temperature.to_string(), "9C / 15C");
    }

    #[tokio::test]
    async fn server_error_is_fetch_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = WeatherConfig::new()
            .with_base_url(mock_server.uri())
            .into_client()
            .unwrap();

        let err = client.fetch_today("130010").await.unwrap_err();
        assert!(matches!(
            err,
            Error::UpstreamFetch(FetchError::Status { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn malformed_body_is_fetch_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&mock_server)
            .await;

        let client = WeatherConfig::new()
            .with_base_url(mock_server.uri())
            .into_client()
            .unwrap();

        let err = client.fetch_today("130010").await.unwrap_err();
        assert!(matches!(err, Error::UpstreamFetch(FetchError::Json(_))));
    }
}

// ============================================================================
// SwitchBot client
// ============================================================================

mod switchbot_client {
    use super::*;

    #[tokio::test]
    async fn send_command_is_signed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(commands_path()))
            .and(header("Authorization", "test-token"))
            .and(header("Content-Type", "application/json; charset=utf8"))
            .and(header_exists("t"))
            .and(header_exists("sign"))
            .and(header_exists("nonce"))
            .and(body_json(serde_json::json!({
                "command": "turnOn",
                "parameter": "default",
                "commandType": "command"
            })))
            .respond_with(switchbot_ok())
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SwitchBotConfig::new("test-token", "test-secret")
            .with_base_url(mock_server.uri())
            .into_client()
            .unwrap();

        let response = client.send_command(DEVICE_ID, &PowerOnCommand).await.unwrap();
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn apply_rgb_setting_sends_commands_in_order() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(commands_path()))
            .respond_with(switchbot_ok())
            .expect(3)
            .mount(&mock_server)
            .await;

        let client = SwitchBotConfig::new("token", "secret")
            .with_base_url(mock_server.uri())
            .into_client()
            .unwrap();

        client
            .apply_setting(DEVICE_ID, &LampSetting::Rgb(RgbColor::CYAN), Brightness::MAX)
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(
            command_names(&requests),
            vec![
                ("setBrightness".to_string(), "100".to_string()),
                ("setColor".to_string(), "0:255:255".to_string()),
                ("turnOn".to_string(), "default".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn apply_color_temperature_setting() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(switchbot_ok())
            .mount(&mock_server)
            .await;

        let client = SwitchBotConfig::new("token", "secret")
            .with_base_url(mock_server.uri())
            .into_client()
            .unwrap();

        let setting = LampSetting::ColorTemperature(ColorTemperature::new(5550).unwrap());
        client
            .apply_setting(DEVICE_ID, &setting, Brightness::new(60).unwrap())
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        let commands = command_names(&requests);
        assert_eq!(commands[0], ("setBrightness".to_string(), "60".to_string()));
        assert_eq!(
            commands[1],
            ("setColorTemperature".to_string(), "5550".to_string())
        );
    }

    #[tokio::test]
    async fn rejected_status_code_stops_sequence() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "statusCode": 161,
                "body": {},
                "message": "device offline"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SwitchBotConfig::new("token", "secret")
            .with_base_url(mock_server.uri())
            .into_client()
            .unwrap();

        let err = client
            .apply_setting(DEVICE_ID, &LampSetting::Rgb(RgbColor::BLUE), Brightness::MAX)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DeviceError::CommandRejected { status_code: 161, ref command, .. } if command == "setBrightness"
        ));
    }

    #[tokio::test]
    async fn unauthorized_is_authentication_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = SwitchBotConfig::new("token", "wrong")
            .with_base_url(mock_server.uri())
            .into_client()
            .unwrap();

        let err = client
            .send_command(DEVICE_ID, &PowerOnCommand)
            .await
            .unwrap_err();
        assert!(matches!(err, DeviceError::AuthenticationFailed(401)));
    }
}

// ============================================================================
// Notifier
// ============================================================================

mod notifier {
    use super::*;

    #[tokio::test]
    async fn disabled_sends_nothing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&mock_server)
            .await;

        let notifier = DiscordConfig::new(Some(format!("{}/webhook", mock_server.uri())))
            .with_enabled(false)
            .into_notifier()
            .unwrap();

        let summary = weather_summary(&mock_server, forecast("0%", "0%", "0%")).await;
        let outcome = notifier
            .notify(&summary, &LampSetting::Rgb(RgbColor::ORANGE))
            .await
            .unwrap();
        assert_eq!(outcome, NotifyOutcome::Disabled);
    }

    #[tokio::test]
    async fn missing_url_is_skipped() {
        let mock_server = MockServer::start().await;
        let notifier = DiscordConfig::new(None).into_notifier().unwrap();

        let summary = weather_summary(&mock_server, forecast("0%", "0%", "0%")).await;
        let outcome = notifier
            .notify(&summary, &LampSetting::Rgb(RgbColor::ORANGE))
            .await
            .unwrap();
        assert_eq!(outcome, NotifyOutcome::Skipped);
    }

    #[tokio::test]
    async fn webhook_receives_embed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/webhook"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let notifier = DiscordConfig::new(Some(format!("{}/webhook", mock_server.uri())))
            .into_notifier()
            .unwrap();

        let summary = weather_summary(&mock_server, forecast("10%", "55%", "5%")).await;
        let outcome = notifier
            .notify(&summary, &LampSetting::Rgb(RgbColor::CYAN))
            .await
            .unwrap();
        assert_eq!(outcome, NotifyOutcome::Sent);

        let requests = mock_server.received_requests().await.unwrap();
        let webhook = requests.iter().find(|r| r.url.path() == "/webhook").unwrap();
        let body: serde_json::Value = serde_json::from_slice(&webhook.body).unwrap();
        let embed = &body["embeds"][0];
        assert_eq!(embed["color"], 0x00FF_FF);
        assert_eq!(embed["thumbnail"]["url"], "https://www.jma.go.jp/bosai/forecast/img/212.svg");
        assert_eq!(embed["fields"][0]["value"], "55%");
    }

    /// Serves `body` from the mock server and fetches it as a summary.
    async fn weather_summary(
        mock_server: &MockServer,
        body: serde_json::Value,
    ) -> rainlamp::ForecastSummary {
        Mock::given(method("GET"))
            .and(path("/city/130010"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(mock_server)
            .await;
        WeatherConfig::new()
            .with_base_url(format!("{}/city", mock_server.uri()))
            .into_client()
            .unwrap()
            .fetch_today("130010")
            .await
            .unwrap()
    }
}

// ============================================================================
// Full run
// ============================================================================

mod pipeline {
    use super::*;

    fn settings(mock_server: &MockServer, extra: &[(&str, &str)]) -> Settings {
        let uri = mock_server.uri();
        let mut vars: HashMap<String, String> = HashMap::new();
        for (k, v) in [
            ("SWITCHBOT_ACCESS_TOKEN", "token"),
            ("SWITCHBOT_SECRET", "secret"),
            ("SWITCHBOT_FLOOR_LAMP_DEVICE_ID", DEVICE_ID),
            ("WEATHER_CITY_CODE", "130010"),
        ] {
            vars.insert(k.to_string(), v.to_string());
        }
        vars.insert("SWITCHBOT_API_BASE_URL".to_string(), uri.clone());
        vars.insert(
            "WEATHER_API_BASE_URL".to_string(),
            format!("{uri}/api/forecast/city"),
        );
        vars.insert("DISCORD_WEBHOOK_URL".to_string(), format!("{uri}/webhook"));
        for (k, v) in extra {
            vars.insert((*k).to_string(), (*v).to_string());
        }
        Settings::from_env_map(vars).unwrap()
    }

    async fn mount_forecast(mock_server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/api/forecast/city/130010"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(mock_server)
            .await;
    }

    #[tokio::test]
    async fn rgb_run_uses_daily_maximum() {
        let mock_server = MockServer::start().await;
        mount_forecast(&mock_server, forecast("10%", "55%", "5%")).await;

        Mock::given(method("POST"))
            .and(path(commands_path()))
            .respond_with(switchbot_ok())
            .expect(3)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/webhook"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let report = Pipeline::new(&settings(&mock_server, &[]))
            .unwrap()
            .run()
            .await
            .unwrap();

        assert_eq!(report.probability.value(), 55.0);
        assert_eq!(report.setting, LampSetting::Rgb(RgbColor::CYAN));
        assert!(report.device_updated);
        assert_eq!(report.notification, NotifyOutcome::Sent);
    }

    #[tokio::test]
    async fn color_temperature_run_end_to_end() {
        let mock_server = MockServer::start().await;
        mount_forecast(&mock_server, forecast("10%", "75%", "30%")).await;

        Mock::given(method("POST"))
            .and(path(commands_path()))
            .respond_with(switchbot_ok())
            .expect(3)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/webhook"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let report = Pipeline::new(&settings(&mock_server, &[("USE_COLOR_TEMPERATURE", "1")]))
            .unwrap()
            .run()
            .await
            .unwrap();

        assert_eq!(
            report.setting,
            LampSetting::ColorTemperature(ColorTemperature::new(5550).unwrap())
        );

        let requests = mock_server.received_requests().await.unwrap();
        let device_requests: Vec<Request> = requests
            .iter()
            .filter(|r| r.url.path() == commands_path())
            .cloned()
            .collect();
        assert!(
            command_names(&device_requests)
                .contains(&("setColorTemperature".to_string(), "5550".to_string()))
        );

        let webhook = requests.iter().find(|r| r.url.path() == "/webhook").unwrap();
        let text = String::from_utf8(webhook.body.clone()).unwrap();
        assert!(text.contains("5550K"));
        assert!(text.contains("\"10%\""));
        assert!(text.contains("\"75%\""));
        assert!(text.contains("\"30%\""));
    }

    #[tokio::test]
    async fn notification_timeout_does_not_fail_run() {
        let mock_server = MockServer::start().await;
        mount_forecast(&mock_server, forecast("0%", "0%", "0%")).await;

        Mock::given(method("POST"))
            .and(path(commands_path()))
            .respond_with(switchbot_ok())
            .expect(3)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/webhook"))
            .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_secs(5)))
            .mount(&mock_server)
            .await;

        let report = Pipeline::new(&settings(&mock_server, &[("DISCORD_TIMEOUT", "1")]))
            .unwrap()
            .run()
            .await
            .unwrap();

        assert!(report.device_updated);
        assert_eq!(report.setting, LampSetting::Rgb(RgbColor::ORANGE));
        assert!(matches!(report.notification, NotifyOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn weather_failure_never_touches_lamp() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .respond_with(switchbot_ok())
            .expect(0)
            .mount(&mock_server)
            .await;

        let err = Pipeline::new(&settings(&mock_server, &[]))
            .unwrap()
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UpstreamFetch(_)));
        assert!(err.is_fatal());
    }

    async fn assert_rejected_before_device(slot: &str, expected: f64) {
        let mock_server = MockServer::start().await;
        mount_forecast(&mock_server, forecast("10%", slot, "20%")).await;

        Mock::given(method("POST"))
            .and(path(commands_path()))
            .respond_with(switchbot_ok())
            .expect(0)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/webhook"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&mock_server)
            .await;

        let err = Pipeline::new(&settings(&mock_server, &[]))
            .unwrap()
            .run()
            .await
            .unwrap_err();

        assert!(
            matches!(err, Error::Value(ValueError::InvalidProbability(v)) if v == expected),
            "{slot}: {err}"
        );
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn slot_above_100_never_touches_lamp() {
        assert_rejected_before_device("140%", 140.0).await;
    }

    #[tokio::test]
    async fn negative_slot_never_touches_lamp() {
        assert_rejected_before_device("-5%", -5.0).await;
    }

    #[tokio::test]
    async fn fractional_slot_is_mapped_as_is() {
        let mock_server = MockServer::start().await;
        mount_forecast(&mock_server, forecast("4.5%", "--%", "4%")).await;

        Mock::given(method("POST"))
            .and(path(commands_path()))
            .respond_with(switchbot_ok())
            .expect(3)
            .mount(&mock_server)
            .await;

        let settings = settings(&mock_server, &[]).with_discord_enabled(false);
        let report = Pipeline::new(&settings).unwrap().run().await.unwrap();

        assert_eq!(report.probability.value(), 4.5);
        assert_eq!(report.setting, LampSetting::Rgb(RgbColor::YELLOW));

        let device_requests: Vec<Request> = mock_server
            .received_requests()
            .await
            .unwrap()
            .into_iter()
            .filter(|r| r.url.path() == commands_path())
            .collect();
        assert!(
            command_names(&device_requests)
                .contains(&("setColor".to_string(), "255:255:0".to_string()))
        );
    }

    #[tokio::test]
    async fn device_failure_aborts_before_notification() {
        let mock_server = MockServer::start().await;
        mount_forecast(&mock_server, forecast("90%", "95%", "100%")).await;

        Mock::given(method("POST"))
            .and(path(commands_path()))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/webhook"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&mock_server)
            .await;

        let err = Pipeline::new(&settings(&mock_server, &[]))
            .unwrap()
            .run()
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Device(DeviceError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn dry_run_skips_device() {
        let mock_server = MockServer::start().await;
        mount_forecast(&mock_server, forecast("30%", "20%", "--%")).await;

        Mock::given(method("POST"))
            .and(path(commands_path()))
            .respond_with(switchbot_ok())
            .expect(0)
            .mount(&mock_server)
            .await;

        let settings = settings(&mock_server, &[]).with_dry_run(true).with_discord_enabled(false);
        let report = Pipeline::new(&settings).unwrap().run().await.unwrap();

        assert!(!report.device_updated);
        assert_eq!(report.setting, LampSetting::Rgb(RgbColor::LIME));
        assert_eq!(report.notification, NotifyOutcome::Disabled);
    }
}
