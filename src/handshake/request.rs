//! Client upgrade request.
//!
//! From [RFC-6455 Section 4.1](https://datatracker.ietf.org/doc/html/rfc6455#section-4.1):
//!
//! Once a connection to the server has been established (including a
//! connection via a proxy or over a TLS-encrypted tunnel), the client
//! MUST send an opening handshake to the server.  The handshake consists
//! of an HTTP Upgrade request, along with a list of required and
//! optional header fields.
//!
//! Example:
//!
//! ```text
//! GET /path HTTP/1.1
//! Host: www.example.com
//! Upgrade: websocket
//! Connection: Upgrade
//! Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==
//! Sec-WebSocket-Version: 13
//! ```
//!

use super::MAX_ALLOW_HEADERS;
use super::HTTP_METHOD;
use super::static_headers::*;

use crate::error::HandshakeError;

/// View of the headers an upgrade depends on.
///
/// A missing header is left empty.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Request<'b> {
    pub upgrade: &'b [u8],
    pub connection: &'b [u8],
    pub sec_key: &'b [u8],
}

impl<'b> Request<'b> {
    /// Create from header values the http layer has already parsed.
    #[inline]
    pub const fn new(upgrade: &'b [u8], connection: &'b [u8], sec_key: &'b [u8]) -> Self {
        Self {
            upgrade,
            connection,
            sec_key,
        }
    }

    /// Pick required headers from a list of `(name, value)`.
    ///
    /// Names are case insensitive, the first occurrence wins.
    pub fn from_headers<I>(headers: I) -> Self
    where
        I: IntoIterator<Item = (&'b [u8], &'b [u8])>,
    {
        let mut request = Self::default();

        for (name, value) in headers {
            let slot = if name.eq_ignore_ascii_case(HEADER_UPGRADE_NAME) {
                &mut request.upgrade
            } else if name.eq_ignore_ascii_case(HEADER_CONNECTION_NAME) {
                &mut request.connection
            } else if name.eq_ignore_ascii_case(HEADER_SEC_WEBSOCKET_KEY_NAME) {
                &mut request.sec_key
            } else {
                continue;
            };

            if slot.is_empty() {
                *slot = value;
            }
        }

        request
    }

    /// Parse from a provided buffer, save the results, and
    /// return the number of bytes parsed.
    ///
    /// Only `GET` over `HTTP/1.1` is accepted. Header values are not
    /// checked here, see [`negotiate`](super::negotiate).
    ///
    /// If the buffer does not contain a complete http request,
    /// a [`HandshakeError::NotEnoughData`] error will be returned.
    pub fn decode(&mut self, buf: &'b [u8]) -> Result<usize, HandshakeError> {
        let mut headers = [httparse::EMPTY_HEADER; MAX_ALLOW_HEADERS];
        let mut request = httparse::Request::new(&mut headers);

        // return value
        let decode_n = match request.parse(buf)? {
            httparse::Status::Complete(n) => n,
            httparse::Status::Partial => return Err(HandshakeError::NotEnoughData),
        };

        // check method
        if request.method.map(str::as_bytes) != Some(HTTP_METHOD) {
            return Err(HandshakeError::HttpMethod);
        }

        // check version, should be HTTP/1.1
        // ref: https://docs.rs/httparse/latest/src/httparse/lib.rs.html#581-596
        if request.version != Some(1_u8) {
            return Err(HandshakeError::HttpVersion);
        }

        // headers are shrunk to number of inited headers
        // ref: https://docs.rs/httparse/latest/src/httparse/lib.rs.html#757-765
        *self = Self::from_headers(
            request
                .headers
                .iter()
                .map(|hdr| (hdr.name.as_bytes(), hdr.value)),
        );

        Ok(decode_n)
    }
}
