use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::Stream;

use crate::frame::{encode, OpCode};
use crate::error::Error;

impl<IO: AsyncWrite + Unpin> Stream<IO> {
    /// Async version of [`write_frame`](Self::write_frame).
    pub async fn write_frame_async(&mut self, opcode: OpCode, payload: &[u8]) -> Result<(), Error> {
        let frame = encode(opcode, payload)?;

        self.io.write_all(&frame).await.map_err(Error::StreamWrite)?;
        self.io.flush().await.map_err(Error::StreamWrite)
    }
}
