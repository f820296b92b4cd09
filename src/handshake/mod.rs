//! Websocket handshake.
//!
//! The server only computes the upgrade; receiving the http request,
//! sending the response and taking over the connection belong
//! to the http layer in front of it.
//!
//! ```
//! use wscore::handshake::{negotiate, Request};
//!
//! let request = Request::new(b"websocket", b"Upgrade", b"dGhlIHNhbXBsZSBub25jZQ==");
//! let response = negotiate(&request).unwrap();
//! assert_eq!(response.sec_accept(), b"s3pPLMBiTxaQ9kYGzzhZRbK+xOo=");
//! ```

pub mod key;
pub mod request;
pub mod response;

pub use request::Request;
pub use response::Response;
pub use key::{derive_accept_key, accept_key};

use crate::error::HandshakeError;
use static_headers::*;

/// 32
pub const MAX_ALLOW_HEADERS: usize = 32;

/// 258EAFA5-E914-47DA-95CA-C5AB0DC85B11
pub const GUID: &[u8] = b"258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

/// GET
pub const HTTP_METHOD: &[u8] = b"GET";

/// CRLF
pub const HTTP_LINE_BREAK: &[u8] = b"\r\n";

/// A colon + one SP is prefered
pub const HTTP_HEADER_SP: &[u8] = b": ";

/// HTTP/1.1 101 Switching Protocols
pub const HTTP_STATUS_LINE: &[u8] = b"HTTP/1.1 101 Switching Protocols";

/// Http header, take two references
#[allow(clippy::len_without_is_empty)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct HttpHeader<'h> {
    pub name: &'h [u8],
    pub value: &'h [u8],
}

impl<'h> HttpHeader<'h> {
    /// Constructor, take provided name and value.
    #[inline]
    pub const fn new(name: &'h [u8], value: &'h [u8]) -> Self { Self { name, value } }

    /// Total number of bytes(name + value + sp).
    #[inline]
    pub const fn len(&self) -> usize {
        self.name.len() + self.value.len() + HTTP_HEADER_SP.len() + HTTP_LINE_BREAK.len()
    }
}

impl<'h> std::fmt::Display for HttpHeader<'h> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            String::from_utf8_lossy(self.name),
            String::from_utf8_lossy(self.value)
        )
    }
}

macro_rules! header {
    (   $(
            $(#[$docs: meta])*
            ($hdr_name: ident => $name: expr);
        )+
    ) => {
        $(
            $(#[$docs])*
            pub const $hdr_name: &[u8] = $name;
        )+
    };
}

macro_rules! write_header {
    ($w: expr, $hdr: expr) => {
        if $w.remaining() < $hdr.len() {
            return Err(HandshakeError::NotEnoughCapacity);
        } else {
            let e = || HandshakeError::NotEnoughCapacity;
            $w.write_or_err($hdr.name, e)?;
            $w.write_or_err(HTTP_HEADER_SP, e)?;
            $w.write_or_err($hdr.value, e)?;
            $w.write_or_err(HTTP_LINE_BREAK, e)?;
        }
    };
    ($w: expr, $name: expr, $value: expr) => {
        write_header!($w, HttpHeader::new($name, $value));
    };
}

pub(self) use write_header;

/// Static http headers
pub mod static_headers {
    // header name
    header! {
        /// Upgrade
        (HEADER_UPGRADE_NAME => b"Upgrade");

        /// Connection
        (HEADER_CONNECTION_NAME => b"Connection");

        /// Sec-WebSocket-Key
        (HEADER_SEC_WEBSOCKET_KEY_NAME => b"Sec-WebSocket-Key");

        /// Sec-WebSocket-Accept
        (HEADER_SEC_WEBSOCKET_ACCEPT_NAME => b"Sec-WebSocket-Accept");
    }

    // header value
    header! {
        /// websocket
        (HEADER_UPGRADE_VALUE => b"websocket");

        /// Upgrade
        (HEADER_CONNECTION_VALUE => b"Upgrade");
    }
}

/// Validate an upgrade request and compute the response headers.
///
/// `upgrade` must be exactly `websocket` and `connection` must be exactly
/// `Upgrade`, otherwise [`HandshakeError::NotAWebSocketUpgrade`] is returned.
/// The accept token is derived from `sec-websocket-key` as is.
///
/// Nothing is written anywhere, so it is safe to call again.
pub fn negotiate(request: &Request) -> Result<Response, HandshakeError> {
    if request.upgrade != HEADER_UPGRADE_VALUE || request.connection != HEADER_CONNECTION_VALUE {
        return Err(HandshakeError::NotAWebSocketUpgrade);
    }

    Ok(Response::new(derive_accept_key(request.sec_key)))
}
