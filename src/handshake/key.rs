//! Key exchange.

use super::GUID;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha1::{Digest, Sha1};

/// Length of a derived `sec-websocket-accept`, base64 of a 20-byte digest.
pub const SEC_ACCEPT_LEN: usize = 28;

/// Derive `sec-websocket-accept` from `sec-websocket-key`.
///
/// Any input is accepted, including an empty key.
#[inline]
pub fn derive_accept_key(sec_key: &[u8]) -> [u8; SEC_ACCEPT_LEN] {
    let mut sha1 = Sha1::default();
    sha1.update(sec_key);
    sha1.update(GUID);
    let input = sha1.finalize();
    let mut output = [0_u8; SEC_ACCEPT_LEN];
    // 20 bytes always encode to 28 bytes
    let _ = STANDARD.encode_slice(input, &mut output);
    output
}

/// String version of [`derive_accept_key`].
#[inline]
pub fn accept_key(sec_key: &str) -> String {
    let mut sha1 = Sha1::default();
    sha1.update(sec_key.as_bytes());
    sha1.update(GUID);
    STANDARD.encode(sha1.finalize())
}
