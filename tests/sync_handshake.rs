use std::io::{Read, Write};
use std::net::{TcpStream, TcpListener};
use std::thread;
use std::time::Duration;

use wscore::endpoint::{Echo, Endpoint, State};
use wscore::error::{Error, HandshakeError};
use wscore::handshake::response::BAD_REQUEST;
use wscore::handshake::Request;

use log::debug;

const UPGRADE: &[u8] = b"\
    GET /ws HTTP/1.1\r\n\
    Host: www.example.com\r\n\
    Upgrade: websocket\r\n\
    Connection: Upgrade\r\n\
    Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\n\
    Sec-WebSocket-Version: 13\r\n\r\n";

const PLAIN_GET: &[u8] = b"\
    GET /index.html HTTP/1.1\r\n\
    Host: www.example.com\r\n\r\n";

const ACCEPTED: &[u8] = b"\
    HTTP/1.1 101 Switching Protocols\r\n\
    Upgrade: websocket\r\n\
    Connection: Upgrade\r\n\
    Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=\r\n\r\n";

/// Accept one connection, answer the handshake and return the final state.
fn serve_one(lis: TcpListener) -> (Result<(), Error>, State) {
    let mut buf = vec![0u8; 1024];
    let (mut tcp, _) = lis.accept().unwrap();
    debug!("server: tcp accepted!");

    let mut n = 0;
    loop {
        let x = tcp.read(&mut buf[n..]).unwrap();
        assert_ne!(x, 0);
        n += x;
        match Request::default().decode(&buf[..n]) {
            Err(HandshakeError::NotEnoughData) => continue,
            _ => break,
        }
    }

    let mut request = Request::default();
    request.decode(&buf[..n]).unwrap();

    let mut endpoint = Endpoint::new(Echo);
    let ret = endpoint.accept(&request, |response| {
        tcp.write_all(&response.to_vec())?;
        Ok(tcp.try_clone()?)
    });

    if let Err(Error::Handshake(HandshakeError::NotAWebSocketUpgrade)) = ret {
        debug!("server: reject");
        tcp.write_all(BAD_REQUEST).unwrap();
    }

    (ret, endpoint.state())
}

#[test]
fn sync_handshake() {
    let _ = env_logger::try_init();

    let lis = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = lis.local_addr().unwrap();

    let t1 = thread::spawn(move || serve_one(lis));

    let t2 = thread::spawn(move || {
        let mut tcp = TcpStream::connect(addr).unwrap();
        debug!("client: tcp connected!");

        // send the request in two pieces
        let (a, b) = UPGRADE.split_at(UPGRADE.len() / 2);
        tcp.write_all(a).unwrap();
        thread::sleep(Duration::from_millis(100));
        tcp.write_all(b).unwrap();

        let mut buf = vec![0u8; ACCEPTED.len()];
        tcp.read_exact(&mut buf).unwrap();
        assert_eq!(buf, ACCEPTED);
        debug!("client: websocket connected!");
    });

    t2.join().unwrap();
    let (ret, state) = t1.join().unwrap();
    assert!(ret.is_ok());
    assert_eq!(state, State::Streaming);
}

#[test]
fn sync_handshake_reject() {
    let _ = env_logger::try_init();

    let lis = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = lis.local_addr().unwrap();

    let t1 = thread::spawn(move || serve_one(lis));

    let t2 = thread::spawn(move || {
        let mut tcp = TcpStream::connect(addr).unwrap();
        debug!("client: tcp connected!");
        tcp.write_all(PLAIN_GET).unwrap();

        let mut buf = Vec::new();
        tcp.read_to_end(&mut buf).unwrap();
        assert_eq!(buf, BAD_REQUEST);
        debug!("client: rejected");
    });

    let (ret, state) = t1.join().unwrap();
    t2.join().unwrap();
    assert!(matches!(ret, Err(Error::Handshake(HandshakeError::NotAWebSocketUpgrade))));
    assert_eq!(state, State::Closed);
}
