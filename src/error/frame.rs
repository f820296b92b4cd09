use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq, Eq)]
pub enum FrameError {
    // read
    FragmentationUnsupported,

    UnmaskedClientFrame,

    PayloadTooLarge,

    UnexpectedEndOfStream,

    // write
    PayloadTooLargeForBasicEncoding,

    // buffer
    NotEnoughData,

    NotEnoughCapacity,
}

impl Display for FrameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use FrameError::*;
        match self {
            FragmentationUnsupported => write!(f, "Fragmented frames are not supported"),
            UnmaskedClientFrame => write!(f, "Client frame is not masked"),
            PayloadTooLarge => write!(f, "Payload length exceeds the addressable size"),
            UnexpectedEndOfStream => write!(f, "Stream closed in the middle of a frame"),
            PayloadTooLargeForBasicEncoding => {
                write!(f, "Payload longer than 125 bytes can not be encoded")
            }
            NotEnoughData => write!(f, "Not enough data to parse"),
            NotEnoughCapacity => write!(f, "Not enough space to write to"),
        }
    }
}

// use default impl
impl std::error::Error for FrameError {}
