//! Websocket endpoint.
//!
//! An [`Endpoint`] drives one connection through
//! `AwaitingHandshake -> Streaming -> Closed`:
//!
//! - [`accept`](Endpoint::accept) validates the upgrade request; the
//!   provided `upgrade` callback sends the response and hands back the
//!   raw connection.
//! - [`serve`](Endpoint::serve) reads a frame, passes it to the [`Handler`],
//!   and writes the reply, until an error or the end of stream.
//!
//! Once closed, the connection is dropped and the endpoint can not be reused.
//!
//! ```no_run
//! use std::io::Write;
//! use std::net::TcpListener;
//! use wscore::endpoint::{Echo, Endpoint};
//! use wscore::handshake::Request;
//!
//! let lis = TcpListener::bind("127.0.0.1:8080").unwrap();
//! let (mut tcp, _) = lis.accept().unwrap();
//! // read and parse the request with any http library
//! let request = Request::new(b"websocket", b"Upgrade", b"dGhlIHNhbXBsZSBub25jZQ==");
//! let mut endpoint = Endpoint::new(Echo);
//! let _ = endpoint.run(&request, |response| {
//!     tcp.write_all(&response.to_vec())?;
//!     Ok(tcp)
//! });
//! ```

mod server;

cfg_if::cfg_if! {
    if #[cfg(feature = "tokio")] {
        mod async_server;
    }
}

use log::debug;

use crate::frame::Frame;
use crate::stream::{Config, Stream};

/// Process a decoded frame and produce the reply.
pub trait Handler {
    fn handle(&mut self, frame: Frame) -> Frame;
}

impl<F: FnMut(Frame) -> Frame> Handler for F {
    #[inline]
    fn handle(&mut self, frame: Frame) -> Frame { self(frame) }
}

/// Send every frame back as is.
#[derive(Debug, Default, Clone, Copy)]
pub struct Echo;

impl Handler for Echo {
    #[inline]
    fn handle(&mut self, frame: Frame) -> Frame { frame }
}

/// Connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    AwaitingHandshake,
    Streaming,
    Closed,
}

enum Inner<IO> {
    AwaitingHandshake,
    Streaming(Stream<IO>),
    Closed,
}

/// Server endpoint of a single connection.
pub struct Endpoint<IO, H> {
    inner: Inner<IO>,
    handler: H,
    config: Config,
}

impl<IO, H> std::fmt::Debug for Endpoint<IO, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("state", &self.state())
            .field("config", &self.config)
            .finish()
    }
}

impl<IO, H: Handler> Endpoint<IO, H> {
    /// Create an endpoint waiting for a handshake.
    #[inline]
    pub fn new(handler: H) -> Self { Self::with_config(handler, Config::default()) }

    /// Create with custom stream options.
    #[inline]
    pub const fn with_config(handler: H, config: Config) -> Self {
        Self {
            inner: Inner::AwaitingHandshake,
            handler,
            config,
        }
    }
}

impl<IO, H> Endpoint<IO, H> {
    /// Current state.
    #[inline]
    pub const fn state(&self) -> State {
        match self.inner {
            Inner::AwaitingHandshake => State::AwaitingHandshake,
            Inner::Streaming(_) => State::Streaming,
            Inner::Closed => State::Closed,
        }
    }

    /// Get the handler back.
    #[inline]
    pub fn into_handler(self) -> H { self.handler }

    /// Enter `Streaming` with an upgraded connection.
    fn open(&mut self, io: IO) {
        debug!("endpoint: {:?} -> {:?}", self.state(), State::Streaming);
        self.inner = Inner::Streaming(Stream::with_config(io, self.config));
    }

    /// Enter `Closed`, the connection(if any) is dropped here.
    fn close(&mut self) {
        debug!("endpoint: {:?} -> {:?}", self.state(), State::Closed);
        self.inner = Inner::Closed;
    }

    /// Check the state before a handshake.
    fn expect_handshake(&self) -> Result<(), crate::error::Error> {
        match self.inner {
            Inner::AwaitingHandshake => Ok(()),
            _ => Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "handshake already performed",
            )
            .into()),
        }
    }
}

impl<IO> Inner<IO> {
    /// Get the stream while `Streaming`.
    fn stream(&mut self) -> Result<&mut Stream<IO>, crate::error::Error> {
        match self {
            Inner::Streaming(stream) => Ok(stream),
            _ => Err(std::io::Error::from(std::io::ErrorKind::NotConnected).into()),
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::{Read, Write, Result};

    pub const SEC_KEY: &[u8] = b"dGhlIHNhbXBsZSBub25jZQ==";

    pub const RESPONSE: &[u8] = b"\
        HTTP/1.1 101 Switching Protocols\r\n\
        Upgrade: websocket\r\n\
        Connection: Upgrade\r\n\
        Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=\r\n\r\n";

    /// Masked text frame "ping".
    pub const PING: &[u8] = &[0x81, 0x84, 0x37, 0xfa, 0x21, 0x3d, 0x47, 0x93, 0x4f, 0x5a];

    /// Read from one buffer and write to another, record whether it is dropped.
    pub struct MockConn {
        pub rbuf: Vec<u8>,
        pub cursor: usize,
        pub wbuf: std::rc::Rc<std::cell::RefCell<Vec<u8>>>,
        pub dropped: std::rc::Rc<std::cell::Cell<bool>>,
    }

    impl MockConn {
        pub fn new(rbuf: Vec<u8>) -> Self {
            Self {
                rbuf,
                cursor: 0,
                wbuf: Default::default(),
                dropped: Default::default(),
            }
        }
    }

    impl Read for MockConn {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
            let n = std::cmp::min(buf.len(), self.rbuf.len() - self.cursor);
            buf[..n].copy_from_slice(&self.rbuf[self.cursor..self.cursor + n]);
            self.cursor += n;
            Ok(n)
        }
    }

    impl Write for MockConn {
        fn write(&mut self, buf: &[u8]) -> Result<usize> {
            self.wbuf.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<()> { Ok(()) }
    }

    impl Drop for MockConn {
        fn drop(&mut self) { self.dropped.set(true); }
    }
}
