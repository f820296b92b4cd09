use crate::frame::{Fin, Mask, PayloadLen};
use crate::error::FrameError;

/// Payload buffer reserved up front, it grows as data arrives.
pub(super) const PREALLOC_PAYLOAD_LEN: usize = 0x10000;

/// Check the first two bytes of a client frame,
/// return the count of extended length bytes that follow.
#[inline]
pub(super) fn check_head(b1: u8, b2: u8) -> Result<usize, FrameError> {
    // continuation frames are never reassembled
    if Fin::from_flag(b1) == Fin::N {
        return Err(FrameError::FragmentationUnsupported);
    }

    // ref: https://datatracker.ietf.org/doc/html/rfc6455#section-5.1
    if Mask::from_flag(b2) == Mask::None {
        return Err(FrameError::UnmaskedClientFrame);
    }

    Ok(PayloadLen::from_flag(b2).extended_len())
}

/// Get the payload length from the length flag and extended length bytes.
#[inline]
pub(super) fn payload_len(b2: u8, extended: &[u8], max: usize) -> Result<usize, FrameError> {
    let length = match PayloadLen::from_flag(b2) {
        PayloadLen::Standard(n) => PayloadLen::Standard(n),
        PayloadLen::Extended1(_) => {
            let mut buf = [0_u8; 2];
            buf.copy_from_slice(extended);
            PayloadLen::from_byte2(buf)
        }
        PayloadLen::Extended2(_) => {
            let mut buf = [0_u8; 8];
            buf.copy_from_slice(extended);
            PayloadLen::from_byte8(buf)
        }
    };

    length.to_usize(max)
}
