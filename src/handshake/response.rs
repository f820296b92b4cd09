//! Server upgrade response.
//!
//! From [RFC-6455 Section 4.2](https://datatracker.ietf.org/doc/html/rfc6455#section-4.2):
//!
//! If the server chooses to accept the incoming connection, it MUST
//! reply with a valid HTTP response.
//!
//! Example:
//!
//! ```text
//! HTTP/1.1 101 Switching Protocols
//! Upgrade: websocket
//! Connection: Upgrade
//! Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=
//! ```
//!

use super::HttpHeader;
use super::write_header;
use super::key::SEC_ACCEPT_LEN;
use super::{HTTP_STATUS_LINE, HTTP_LINE_BREAK, HTTP_HEADER_SP};
use super::static_headers::*;

use crate::bleed::Writer;
use crate::error::HandshakeError;

/// Reply to a request which is not a websocket upgrade.
pub const BAD_REQUEST: &[u8] = b"\
    HTTP/1.1 400 Bad Request\r\n\
    Content-Type: text/plain; charset=utf-8\r\n\
    Content-Length: 26\r\n\
    Connection: close\r\n\r\n\
    Not a WebSocket handshake\n";

/// Response headers of an accepted upgrade.
///
/// Always holds exactly `Upgrade`, `Connection` and `Sec-WebSocket-Accept`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    sec_accept: [u8; SEC_ACCEPT_LEN],
}

impl Response {
    /// Create with a derived accept key.
    #[inline]
    pub const fn new(sec_accept: [u8; SEC_ACCEPT_LEN]) -> Self { Self { sec_accept } }

    /// Value of `Sec-WebSocket-Accept`.
    #[inline]
    pub const fn sec_accept(&self) -> &[u8] { &self.sec_accept }

    /// All response headers, in the order they are sent.
    #[inline]
    pub fn headers(&self) -> [HttpHeader<'_>; 3] {
        [
            HttpHeader::new(HEADER_UPGRADE_NAME, HEADER_UPGRADE_VALUE),
            HttpHeader::new(HEADER_CONNECTION_NAME, HEADER_CONNECTION_VALUE),
            HttpHeader::new(HEADER_SEC_WEBSOCKET_ACCEPT_NAME, &self.sec_accept),
        ]
    }

    /// Look up a header value, the name is case insensitive.
    pub fn get(&self, name: &[u8]) -> Option<&[u8]> {
        self.headers()
            .into_iter()
            .find(|hdr| hdr.name.eq_ignore_ascii_case(name))
            .map(|hdr| hdr.value)
    }

    /// Length of the encoded response.
    pub fn encoded_len(&self) -> usize {
        HTTP_STATUS_LINE.len()
            + HTTP_LINE_BREAK.len()
            + self.headers().iter().map(HttpHeader::len).sum::<usize>()
            + HTTP_LINE_BREAK.len()
    }

    /// Encode to a provided buffer, return the number of written bytes.
    ///
    /// The status line, all headers and the final CRLF are written.
    ///
    /// Caller should make sure the buffer is large enough,
    /// otherwise a [`HandshakeError::NotEnoughCapacity`] error will be returned.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, HandshakeError> {
        let mut w = Writer::new(buf);

        // HTTP/1.1 101 Switching Protocols
        w.write_or_err(HTTP_STATUS_LINE, || HandshakeError::NotEnoughCapacity)?;
        w.write_or_err(HTTP_LINE_BREAK, || HandshakeError::NotEnoughCapacity)?;

        // Upgrade: websocket
        // Connection: Upgrade
        // Sec-WebSocket-Accept: {sec_accept}
        for hdr in self.headers().iter() {
            write_header!(w, hdr);
        }

        // finish with CRLF
        w.write_or_err(HTTP_LINE_BREAK, || HandshakeError::NotEnoughCapacity)?;

        Ok(w.pos())
    }

    /// Encode to a new buffer.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = vec![0; self.encoded_len()];
        // the buffer is exactly large enough
        let n = self.encode(&mut buf).unwrap_or(0);
        buf.truncate(n);
        buf
    }
}
