use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, TcpListener};

use wscore::endpoint::Endpoint;
use wscore::error::HandshakeError;
use wscore::frame::mask::apply_mask;
use wscore::frame::{Fin, Frame, FrameHead, Mask, OpCode, PayloadLen, MAX_FRAME_HEAD_LEN};
use wscore::handshake::Request;

use log::debug;

const UPGRADE: &[u8] = b"\
    GET /ws HTTP/1.1\r\n\
    Host: www.example.com\r\n\
    Upgrade: websocket\r\n\
    Connection: Upgrade\r\n\
    Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\n\
    Sec-WebSocket-Version: 13\r\n\r\n";

const ACCEPTED: &[u8] = b"\
    HTTP/1.1 101 Switching Protocols\r\n\
    Upgrade: websocket\r\n\
    Connection: Upgrade\r\n\
    Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=\r\n\r\n";

const ECHO_DATA: &[u8] = b"ECHO ECHO ECHO!";

fn masked_frame(opcode: OpCode, payload: &[u8]) -> Vec<u8> {
    let key: [u8; 4] = rand::random();
    let length = PayloadLen::from_num(payload.len() as u64);
    let head = FrameHead::new(Fin::Y, opcode, Mask::Key(key), length);

    let mut frame = vec![0u8; MAX_FRAME_HEAD_LEN + payload.len()];
    let n = head.encode(&mut frame).unwrap();
    frame.truncate(n + payload.len());
    frame[n..].copy_from_slice(payload);
    apply_mask(key, &mut frame[n..]);
    frame
}

#[tokio::test]
async fn async_echo() {
    let _ = env_logger::try_init();

    let lis = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = lis.local_addr().unwrap();

    let t1 = tokio::spawn(async move {
        let mut buf = vec![0u8; 1024];
        let (mut tcp, _) = lis.accept().await.unwrap();
        debug!("server: tcp accepted!");

        let mut n = 0;
        loop {
            let x = tcp.read(&mut buf[n..]).await.unwrap();
            assert_ne!(x, 0);
            n += x;
            match Request::default().decode(&buf[..n]) {
                Ok(_) => break,
                Err(HandshakeError::NotEnoughData) => continue,
                Err(e) => panic!("server: bad request: {}", e),
            }
        }

        let mut request = Request::default();
        request.decode(&buf[..n]).unwrap();

        // count frames and reply in upper case
        let mut count = 0_usize;
        let mut endpoint = Endpoint::new(|frame: Frame| {
            count += 1;
            Frame::new(frame.opcode, frame.payload.to_ascii_uppercase())
        });
        endpoint
            .run_async(&request, |response| async move {
                tcp.write_all(&response.to_vec()).await?;
                debug!("server: websocket accepted!");
                Ok::<_, std::io::Error>(tcp)
            })
            .await
            .unwrap();
        drop(endpoint);

        debug!("server: close");
        count
    });

    let t2 = tokio::spawn(async move {
        let mut buf = vec![0u8; 1024];
        let mut tcp = TcpStream::connect(addr).await.unwrap();
        debug!("client: tcp connected!");

        tcp.write_all(UPGRADE).await.unwrap();
        let response = &mut buf[..ACCEPTED.len()];
        tcp.read_exact(response).await.unwrap();
        assert_eq!(response, ACCEPTED);
        debug!("client: websocket connected!");

        let data = ECHO_DATA.to_ascii_lowercase();
        for i in 1..=5 {
            debug!("client: send[{}]..", i);
            tcp.write_all(&masked_frame(OpCode::Text, &data))
                .await
                .unwrap();

            let reply = &mut buf[..2 + ECHO_DATA.len()];
            tcp.read_exact(reply).await.unwrap();
            assert_eq!(reply[0], 0x81);
            assert_eq!(&reply[2..], ECHO_DATA);
        }

        debug!("client: close");
    });

    t2.await.unwrap();
    assert_eq!(t1.await.unwrap(), 5);
}
