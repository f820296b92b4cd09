use std::io::{Read, Write};

use log::trace;

use super::{Endpoint, Handler};

use crate::handshake::{negotiate, Request, Response};
use crate::error::Error;

impl<IO: Read + Write, H: Handler> Endpoint<IO, H> {
    /// Perform the server side handshake.
    ///
    /// On success `upgrade` is called with the response, it should send
    /// `101 Switching Protocols` with these headers and return the raw
    /// connection, then the endpoint starts `Streaming`.
    ///
    /// If the request is not an upgrade, or `upgrade` fails, the endpoint is
    /// `Closed` and the error is returned. `upgrade` is not called for a bad
    /// request, the caller should reply `400 Bad Request` itself.
    pub fn accept<U>(&mut self, request: &Request, upgrade: U) -> Result<(), Error>
    where
        U: FnOnce(Response) -> std::io::Result<IO>,
    {
        self.expect_handshake()?;

        let response = match negotiate(request) {
            Ok(response) => response,
            Err(e) => {
                self.close();
                return Err(e.into());
            }
        };

        match upgrade(response) {
            Ok(io) => {
                self.open(io);
                Ok(())
            }
            Err(e) => {
                self.close();
                Err(e.into())
            }
        }
    }

    /// Echo loop of an upgraded connection.
    ///
    /// Read a frame, pass it to the handler and write the reply,
    /// until any error occurs. The connection is dropped before return.
    ///
    /// Return `Ok(())` if the client closes the connection between two frames,
    /// otherwise return the error which ends the loop.
    pub fn serve(&mut self) -> Result<(), Error> {
        let stream = self.inner.stream()?;

        let ret = loop {
            let frame = match stream.read_frame() {
                Ok(frame) => frame,
                Err(_) if stream.is_read_eof() => break Ok(()),
                Err(e) => break Err(e),
            };

            trace!(
                "endpoint: read {:?} frame, {} bytes",
                frame.opcode,
                frame.payload.len()
            );

            let reply = self.handler.handle(frame);

            if let Err(e) = stream.write_frame(reply.opcode, &reply.payload) {
                break Err(e);
            }

            trace!(
                "endpoint: write {:?} frame, {} bytes",
                reply.opcode,
                reply.payload.len()
            );
        };

        self.close();
        ret
    }

    /// Combination of [`accept`](Self::accept) and [`serve`](Self::serve).
    pub fn run<U>(&mut self, request: &Request, upgrade: U) -> Result<(), Error>
    where
        U: FnOnce(Response) -> std::io::Result<IO>,
    {
        self.accept(request, upgrade)?;
        self.serve()
    }
}
