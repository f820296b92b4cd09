// #![warn(missing_docs)]

//! Minimal server-side websocket engine.
//!
//! ## Features
//! - Accept key derivation and upgrade negotiation.
//! - Decode masked client frames, encode unmasked server frames.
//! - Blocking and async (tokio) IO.
//! - Single-threaded, one connection per endpoint.
//!
//! Fragmentation, extensions, subprotocols and the closing handshake
//! are not supported.
//!
//! ## High-level API
//!
//! - [`endpoint`]
//! - [`stream`]
//!
//! ```ignore
//! {
//!     // parse the upgrade request
//!     let mut request = Request::default();
//!     let offset = request.decode(&buf)?;
//!     // handshake, then echo every frame
//!     let mut endpoint = Endpoint::new(Echo);
//!     endpoint.run(&request, |response| {
//!         tcp.write_all(&response.to_vec())?;
//!         Ok(tcp)
//!     })?;
//! }
//! ```
//!
//! ## Low-level API
//!
//! - [`frame`]
//! - [`handshake`]
//!
//! Frame:
//!
//! ```ignore
//! {
//!     // encode a server frame
//!     let bytes = frame::encode(OpCode::Text, b"ping")?;
//!
//!     // decode a frame head
//!     let (head, offset) = FrameHead::decode(&buf)?;
//! }
//! ```
//!
//! Handshake:
//!
//! ```ignore
//! {
//!     // derive the accept key
//!     let accept = accept_key("dGhlIHNhbXBsZSBub25jZQ==");
//!
//!     // validate a request and build the response
//!     let response = negotiate(&request)?;
//!     let offset = response.encode(&mut buf)?;
//! }
//! ```

mod bleed;

pub mod error;
pub mod frame;
pub mod stream;
pub mod endpoint;
pub mod handshake;
