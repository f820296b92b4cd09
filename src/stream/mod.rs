//! Websocket stream.
//!
//! [`Stream`] wraps an upgraded connection and moves one whole frame
//! per call. Frames read from it are client frames (must be masked,
//! must be final), frames written to it are server frames.

mod read;
mod write;
mod state;
mod common;

cfg_if::cfg_if! {
    if #[cfg(feature = "tokio")] {
        mod async_read;
        mod async_write;
    }
}

use state::ReadState;
use crate::frame::length::MAX_ADDRESSABLE_LEN;

/// Stream options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// A frame declaring a longer payload is rejected
    /// before any payload is read.
    pub max_payload_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_payload_len: MAX_ADDRESSABLE_LEN,
        }
    }
}

/// Websocket stream.
///
/// This is a simple wrapper of the underlying connection.
/// Nothing is buffered between two frames.
pub struct Stream<IO> {
    io: IO,
    config: Config,
    read_state: ReadState,
}

impl<IO> AsRef<IO> for Stream<IO> {
    #[inline]
    fn as_ref(&self) -> &IO { &self.io }
}

impl<IO> AsMut<IO> for Stream<IO> {
    #[inline]
    fn as_mut(&mut self) -> &mut IO { &mut self.io }
}

impl<IO> std::fmt::Debug for Stream<IO> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream")
            .field("config", &self.config)
            .field("read_state", &self.read_state)
            .finish()
    }
}

impl<IO> Stream<IO> {
    /// Create websocket stream from IO source directly,
    /// without a handshake.
    #[inline]
    pub fn new(io: IO) -> Self { Self::with_config(io, Config::default()) }

    /// Create with custom options.
    #[inline]
    pub const fn with_config(io: IO, config: Config) -> Self {
        Stream {
            io,
            config,
            read_state: ReadState::new(),
        }
    }

    /// Get the options.
    #[inline]
    pub const fn config(&self) -> &Config { &self.config }

    /// Take the underlying IO source back.
    #[inline]
    pub fn into_inner(self) -> IO { self.io }

    /// Check if `EOF` is reached at a frame boundary.
    ///
    /// A read that fails this way is a normal close rather than a broken frame.
    #[inline]
    pub const fn is_read_eof(&self) -> bool { matches!(self.read_state, ReadState::Eof) }

    /// Check if a frame is partially read.
    #[inline]
    pub const fn is_read_partial(&self) -> bool { matches!(self.read_state, ReadState::ReadFrame) }
}
