#![allow(missing_docs)]
//! Errors

mod frame;
mod handshake;

pub use frame::FrameError;
pub use handshake::HandshakeError;

use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum Error {
    Frame(FrameError),

    Handshake(HandshakeError),

    // read
    Io(std::io::Error),

    // write
    StreamWrite(std::io::Error),
}

impl Error {
    /// Map an io error from a read.
    ///
    /// A short read is reported as [`FrameError::UnexpectedEndOfStream`].
    pub(crate) fn from_read(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::Frame(FrameError::UnexpectedEndOfStream)
        } else {
            Error::Io(e)
        }
    }
}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self { Error::Frame(e) }
}

impl From<HandshakeError> for Error {
    fn from(e: HandshakeError) -> Self { Error::Handshake(e) }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error { Error::Io(e) }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        use std::io::ErrorKind;
        match e {
            Error::Io(e) | Error::StreamWrite(e) => e,
            Error::Frame(FrameError::UnexpectedEndOfStream) => {
                std::io::Error::new(ErrorKind::UnexpectedEof, e)
            }
            e => std::io::Error::new(ErrorKind::InvalidData, e),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use Error::*;
        match self {
            Frame(e) => write!(f, "Frame error: {}", e),
            Handshake(e) => write!(f, "Handshake error: {}", e),
            Io(e) => write!(f, "Io error: {}", e),
            StreamWrite(e) => write!(f, "Stream write error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;

        match self {
            Frame(e) => Some(e),
            Handshake(e) => Some(e),
            Io(e) | StreamWrite(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn short_read() {
        let e = Error::from_read(ErrorKind::UnexpectedEof.into());
        assert!(matches!(e, Error::Frame(FrameError::UnexpectedEndOfStream)));

        let e = Error::from_read(ErrorKind::TimedOut.into());
        assert!(matches!(e, Error::Io(ref e) if e.kind() == ErrorKind::TimedOut));
    }

    #[test]
    fn into_io_error() {
        let e: std::io::Error = Error::StreamWrite(ErrorKind::BrokenPipe.into()).into();
        assert_eq!(e.kind(), ErrorKind::BrokenPipe);

        let e: std::io::Error = Error::from(FrameError::UnexpectedEndOfStream).into();
        assert_eq!(e.kind(), ErrorKind::UnexpectedEof);

        let e: std::io::Error = Error::from(FrameError::UnmaskedClientFrame).into();
        assert_eq!(e.kind(), ErrorKind::InvalidData);
    }
}
