// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SwitchBot API v1.1 request signing.
//!
//! Every request carries the token, a millisecond timestamp `t`, a random
//! `nonce`, and `sign = base64(HMAC-SHA256(secret, token + t + nonce))`.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::DeviceError;

type HmacSha256 = Hmac<Sha256>;

/// Authentication headers for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Unix epoch time in milliseconds.
    pub t: String,
    /// Random per-request nonce.
    pub nonce: String,
    /// Base64-encoded HMAC-SHA256 signature.
    pub sign: String,
}

/// Signs a request with an explicit timestamp and nonce.
///
/// # Errors
///
/// Returns `DeviceError::Signing` if the HMAC cannot be keyed.
///
/// # Examples
///
/// ```
/// use rainlamp::protocol::sign::sign;
///
/// let sig = sign("token-abc", "secret-key", 1_700_000_000_000, "nonce-123").unwrap();
/// assert_eq!(sig.t, "1700000000000");
/// assert_eq!(sig.sign, "GrVae/qzlQInWXHs6OkSb6wADiSz37TLVSGKmYCsyhg=");
/// ```
pub fn sign(token: &str, secret: &str, timestamp_ms: i64, nonce: &str) -> Result<Signature, DeviceError> {
    let t = timestamp_ms.to_string();

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| DeviceError::Signing(e.to_string()))?;
    mac.update(token.as_bytes());
    mac.update(t.as_bytes());
    mac.update(nonce.as_bytes());
    let sign = BASE64.encode(mac.finalize().into_bytes());

    Ok(Signature {
        t,
        nonce: nonce.to_string(),
        sign,
    })
}

/// Signs a request with the current time and a fresh UUID v4 nonce.
///
/// # Errors
///
/// Returns `DeviceError::Signing` if the HMAC cannot be keyed.
pub fn sign_now(token: &str, secret: &str) -> Result<Signature, DeviceError> {
    let nonce = uuid::Uuid::new_v4().to_string();
    sign(token, secret, chrono::Utc::now().timestamp_millis(), &nonce)
}
