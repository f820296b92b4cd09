use std::io::Write;

use super::Stream;

use crate::frame::{encode, OpCode};
use crate::error::Error;

impl<IO: Write> Stream<IO> {
    /// Encode a server frame and write it to the IO source,
    /// block until all data are written.
    ///
    /// An encoding failure is returned as [`Error::Frame`] and nothing is
    /// written; a failure of the IO source is returned as
    /// [`Error::StreamWrite`].
    pub fn write_frame(&mut self, opcode: OpCode, payload: &[u8]) -> Result<(), Error> {
        let frame = encode(opcode, payload)?;

        self.io.write_all(&frame).map_err(Error::StreamWrite)?;
        self.io.flush().map_err(Error::StreamWrite)
    }
}
