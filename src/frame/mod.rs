//! Websocket data frame.
//!
//! [RFC-6455 Section5](https://datatracker.ietf.org/doc/html/rfc6455#section-5)
//!
//! ```text
//! 0                   1                   2                   3
//! 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-------+-+-------------+-------------------------------+
//! |F|R|R|R| opcode|M| Payload len |    Extended payload length    |
//! |I|S|S|S|  (4)  |A|     (7)     |             (16/64)           |
//! |N|V|V|V|       |S|             |   (if payload len==126/127)   |
//! | |1|2|3|       |K|             |                               |
//! +-+-+-+-+-------+-+-------------+ - - - - - - - - - - - - - - - +
//! |     Extended payload length continued, if payload len == 127  |
//! + - - - - - - - - - - - - - - - +-------------------------------+
//! |                               |Masking-key, if MASK set to 1  |
//! +-------------------------------+-------------------------------+
//! | Masking-key (continued)       |          Payload Data         |
//! +-------------------------------- - - - - - - - - - - - - - - - +
//! :                     Payload Data continued ...                :
//! + - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - +
//! |                     Payload Data continued ...                |
//! +---------------------------------------------------------------+
//! ```
//!
//! Frames sent by this server only use the first two bytes
//! and the payload, see [`encode`].
//!

pub mod flag;
pub mod length;
pub mod mask;

pub use flag::{Fin, OpCode};
pub use length::PayloadLen;
pub use mask::Mask;

use crate::bleed::Writer;
use crate::error::FrameError;

/// Longest frame head, 2 + 8 + 4.
pub const MAX_FRAME_HEAD_LEN: usize = 14;

/// Longest payload a server frame could carry.
pub const MAX_BASIC_PAYLOAD_LEN: usize = 125;

/// Websocket frame head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHead {
    pub fin: Fin,
    pub opcode: OpCode,
    pub mask: Mask,
    pub length: PayloadLen,
}

impl FrameHead {
    /// Constructor.
    #[inline]
    pub const fn new(fin: Fin, opcode: OpCode, mask: Mask, length: PayloadLen) -> Self {
        Self {
            fin,
            opcode,
            mask,
            length,
        }
    }

    /// Total head length indicated by the second head byte.
    #[inline]
    pub const fn head_len(b2: u8) -> usize {
        2 + PayloadLen::from_flag(b2).extended_len() + Mask::from_flag(b2).key_len()
    }

    /// Encode to provided buffer, returns the count of written bytes.
    /// The caller should ensure the buffer is large enough,
    /// otherwise a [`FrameError::NotEnoughCapacity`] error will be returned.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, FrameError> {
        let mut writer = Writer::new(buf);

        macro_rules! writex {
            ($dst: expr) => {
                writer.write_or_err($dst, || FrameError::NotEnoughCapacity)?
            };
        }

        // fin, opcode
        let b1 = self.fin as u8 | self.opcode.to_flag();

        // mask, payload length
        let b2 = self.mask.to_flag() | self.length.to_flag();

        writex!(&[b1, b2]);

        // extended payload length
        match &self.length {
            PayloadLen::Standard(_) => 0,
            PayloadLen::Extended1(v) => writex!(&v.to_be_bytes()),
            PayloadLen::Extended2(v) => writex!(&v.to_be_bytes()),
        };

        // mask key
        if let Mask::Key(k) = &self.mask {
            writex!(k);
        }

        Ok(writer.pos())
    }

    /// Parse from provided buffer, returns [`FrameHead`] and the count of read bytes
    /// if the parse succeeds.
    /// If there is not enough data to parse, a [`FrameError::NotEnoughData`] error
    /// will be returned.
    pub fn decode(buf: &[u8]) -> Result<(Self, usize), FrameError> {
        if buf.len() < 2 {
            return Err(FrameError::NotEnoughData);
        }

        let (b1, b2) = (buf[0], buf[1]);

        if buf.len() < Self::head_len(b2) {
            return Err(FrameError::NotEnoughData);
        }

        let fin = Fin::from_flag(b1);
        let opcode = OpCode::from_flag(b1);

        let mut mask = Mask::from_flag(b2);
        let mut length = PayloadLen::from_flag(b2);

        let mut n: usize = 2;

        macro_rules! array {
            ($len: expr) => {{
                let mut arr = [0_u8; $len];
                arr.copy_from_slice(&buf[n..n + $len]);
                n += $len;
                arr
            }};
        }

        match length {
            PayloadLen::Standard(_) => {}
            PayloadLen::Extended1(_) => length = PayloadLen::from_byte2(array!(2)),
            PayloadLen::Extended2(_) => length = PayloadLen::from_byte8(array!(8)),
        };

        if let Mask::Key(_) = mask {
            mask = Mask::Key(array!(4));
        }

        Ok((
            FrameHead {
                fin,
                opcode,
                mask,
                length,
            },
            n,
        ))
    }
}

/// A complete frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub opcode: OpCode,
    pub fin: Fin,
    pub payload: Vec<u8>,
}

impl Frame {
    /// Create a final frame.
    #[inline]
    pub fn new(opcode: OpCode, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            opcode,
            fin: Fin::Y,
            payload: payload.into(),
        }
    }

    /// Create a final text frame.
    #[inline]
    pub fn text(payload: impl Into<Vec<u8>>) -> Self { Self::new(OpCode::Text, payload) }

    /// Create a final binary frame.
    #[inline]
    pub fn binary(payload: impl Into<Vec<u8>>) -> Self { Self::new(OpCode::Binary, payload) }

    /// Encode as a server frame, see [`encode`].
    #[inline]
    pub fn encode(&self) -> Result<Vec<u8>, FrameError> { encode(self.opcode, &self.payload) }
}

/// Encode a server frame.
///
/// Fin is always set and the payload is never masked.
/// Only the 7-bit length form is supported, a payload longer than
/// [`MAX_BASIC_PAYLOAD_LEN`] results in
/// [`FrameError::PayloadTooLargeForBasicEncoding`].
pub fn encode(opcode: OpCode, payload: &[u8]) -> Result<Vec<u8>, FrameError> {
    if payload.len() > MAX_BASIC_PAYLOAD_LEN {
        return Err(FrameError::PayloadTooLargeForBasicEncoding);
    }

    let head = FrameHead::new(
        Fin::Y,
        opcode,
        Mask::None,
        PayloadLen::Standard(payload.len() as u8),
    );

    let mut frame = vec![0; 2 + payload.len()];
    let n = head.encode(&mut frame)?;
    frame[n..].copy_from_slice(payload);

    Ok(frame)
}
