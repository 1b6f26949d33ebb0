use ebgsign_core::hash::{hex_hmac_sha256, hex_sha256};
use log::debug;

use crate::constants::SIGNATURE_VERSION;

/// Sign a canonical request at `timestamp`.
///
/// ```text
/// StringToSign = Timestamp + "\n" + HexSHA256(CanonicalRequest)
/// Signature    = "v1:" + HexHMACSHA256(SecretKey, StringToSign)
/// ```
///
/// The canonical request is hashed before the HMAC, verifiers depend on
/// this exact construction.
pub fn sign(secret_key: &str, timestamp: &str, canonical_request: &str) -> String {
    let string_to_sign = string_to_sign(timestamp, canonical_request);
    debug!("string to sign: {string_to_sign:?}");

    let mut signature = String::with_capacity(SIGNATURE_VERSION.len() + 64);
    signature.push_str(SIGNATURE_VERSION);
    signature.push_str(&hex_hmac_sha256(
        secret_key.as_bytes(),
        string_to_sign.as_bytes(),
    ));
    signature
}

fn string_to_sign(timestamp: &str, canonical_request: &str) -> String {
    format!("{timestamp}\n{}", hex_sha256(canonical_request.as_bytes()))
}
