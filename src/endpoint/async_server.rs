use std::future::Future;

use log::trace;
use tokio::io::{AsyncRead, AsyncWrite};

use super::{Endpoint, Handler};

use crate::handshake::{negotiate, Request, Response};
use crate::error::Error;

impl<IO: AsyncRead + AsyncWrite + Unpin, H: Handler> Endpoint<IO, H> {
    /// Async version of [`accept`](Self::accept).
    pub async fn accept_async<U, F>(&mut self, request: &Request<'_>, upgrade: U) -> Result<(), Error>
    where
        U: FnOnce(Response) -> F,
        F: Future<Output = std::io::Result<IO>>,
    {
        self.expect_handshake()?;

        let response = match negotiate(request) {
            Ok(response) => response,
            Err(e) => {
                self.close();
                return Err(e.into());
            }
        };

        match upgrade(response).await {
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

    /// Async version of [`serve`](Self::serve).
    pub async fn serve_async(&mut self) -> Result<(), Error> {
        let stream = self.inner.stream()?;

        let ret = loop {
            let frame = match stream.read_frame_async().await {
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

            if let Err(e) = stream.write_frame_async(reply.opcode, &reply.payload).await {
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

    /// Async version of [`run`](Self::run).
    pub async fn run_async<U, F>(&mut self, request: &Request<'_>, upgrade: U) -> Result<(), Error>
    where
        U: FnOnce(Response) -> F,
        F: Future<Output = std::io::Result<IO>>,
    {
        self.accept_async(request, upgrade).await?;
        self.serve_async().await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::{Echo, State};
    use super::super::test::{SEC_KEY, RESPONSE, PING};
    use crate::error::{FrameError, HandshakeError};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn upgrade_request() -> Request<'static> { Request::new(b"websocket", b"Upgrade", SEC_KEY) }

    #[tokio::test]
    async fn async_server_echo() {
        let (mut client, server) = tokio::io::duplex(64);

        let task = tokio::spawn(async move {
            let mut endpoint = Endpoint::new(Echo);
            let ret = endpoint
                .run_async(&upgrade_request(), |response| async move {
                    let mut server = server;
                    server.write_all(&response.to_vec()).await?;
                    Ok::<_, std::io::Error>(server)
                })
                .await;
            (ret, endpoint.state())
        });

        let mut buf = vec![0_u8; RESPONSE.len()];
        client.read_exact(&mut buf).await.unwrap();
        assert_eq!(buf, RESPONSE);

        for _ in 0..3 {
            client.write_all(PING).await.unwrap();
            let mut buf = [0_u8; 6];
            client.read_exact(&mut buf).await.unwrap();
            assert_eq!(&buf, b"\x81\x04ping");
        }

        drop(client);

        let (ret, state) = task.await.unwrap();
        assert!(ret.is_ok());
        assert_eq!(state, State::Closed);
    }

    #[tokio::test]
    async fn async_server_reject() {
        let (_client, server) = tokio::io::duplex(64);

        let mut endpoint = Endpoint::new(Echo);
        let request = Request::new(b"", b"Upgrade", SEC_KEY);
        let e = endpoint
            .run_async(&request, |_| async move { Ok::<_, std::io::Error>(server) })
            .await
            .unwrap_err();

        assert!(matches!(e, Error::Handshake(HandshakeError::NotAWebSocketUpgrade)));
        assert_eq!(endpoint.state(), State::Closed);
    }

    #[tokio::test]
    async fn async_server_broken_frame() {
        let (mut client, server) = tokio::io::duplex(64);
        client.write_all(&PING[..3]).await.unwrap();
        drop(client);

        let mut endpoint = Endpoint::new(Echo);
        let e = endpoint
            .run_async(&upgrade_request(), |_| async move { Ok::<_, std::io::Error>(server) })
            .await
            .unwrap_err();

        assert!(matches!(e, Error::Frame(FrameError::UnexpectedEndOfStream)));
        assert_eq!(endpoint.state(), State::Closed);
    }
}
