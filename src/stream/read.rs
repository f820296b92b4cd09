use std::io::{Read, ErrorKind};

use super::Stream;
use super::ReadState;
use super::common::{check_head, payload_len, PREALLOC_PAYLOAD_LEN};

use crate::frame::{Fin, OpCode, Frame, MAX_FRAME_HEAD_LEN};
use crate::frame::mask::apply_mask4;
use crate::error::{Error, FrameError};

impl<IO: Read> Stream<IO> {
    /// Read one complete client frame, block until it arrives.
    ///
    /// The frame must be final and masked, its payload is unmasked
    /// before it is returned.
    ///
    /// If the IO source is closed in the middle of a frame,
    /// [`FrameError::UnexpectedEndOfStream`] is returned and nothing
    /// of the frame is exposed. The same error is returned if it is closed
    /// before a new frame starts, which could be told apart via
    /// [`Stream::is_read_eof`].
    pub fn read_frame(&mut self) -> Result<Frame, Error> {
        let mut head = [0_u8; MAX_FRAME_HEAD_LEN];

        // fin, opcode, mask, payload length
        self.read_head(&mut head[..2])?;
        let (b1, b2) = (head[0], head[1]);

        let ext_len = check_head(b1, b2)?;

        // extended payload length
        let (_, rest) = head.split_at_mut(2);
        let (ext, rest) = rest.split_at_mut(ext_len);
        self.io.read_exact(ext).map_err(Error::from_read)?;
        let len = payload_len(b2, ext, self.config.max_payload_len)?;

        // mask key
        let key = &mut rest[..4];
        self.io.read_exact(key).map_err(Error::from_read)?;
        let key = [key[0], key[1], key[2], key[3]];

        // payload
        let mut payload = Vec::with_capacity(std::cmp::min(len, PREALLOC_PAYLOAD_LEN));
        let read_n = (&mut self.io)
            .take(len as u64)
            .read_to_end(&mut payload)
            .map_err(Error::from_read)?;

        if read_n != len {
            return Err(FrameError::UnexpectedEndOfStream.into());
        }

        apply_mask4(key, &mut payload);

        self.read_state = ReadState::ReadHead;

        Ok(Frame {
            opcode: OpCode::from_flag(b1),
            fin: Fin::Y,
            payload,
        })
    }

    /// Fill the first bytes of a frame head, record `EOF` if the IO source
    /// is closed before any byte of it arrives.
    fn read_head(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        let mut offset = 0;

        while offset < buf.len() {
            match self.io.read(&mut buf[offset..]) {
                Ok(0) => {
                    if offset == 0 {
                        self.read_state = ReadState::Eof;
                    }
                    return Err(FrameError::UnexpectedEndOfStream.into());
                }
                Ok(n) => {
                    offset += n;
                    self.read_state = ReadState::ReadFrame;
                }
                Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::from_read(e)),
            }
        }

        Ok(())
    }
}
