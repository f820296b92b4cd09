//! Websocket echo server.
//!
//! ```text
//! RUST_LOG=debug cargo run --example echo_server -- 127.0.0.1:8080
//! ```

use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use log::{debug, info, warn};

use wscore::endpoint::Endpoint;
use wscore::error::{Error, HandshakeError};
use wscore::frame::Frame;
use wscore::handshake::response::BAD_REQUEST;
use wscore::handshake::Request;

const DEFAULT_ADDR: &str = "127.0.0.1:8080";
const MAX_REQUEST_LEN: usize = 4096;

/// Read until the buffer holds a complete request, return its length.
fn read_request(tcp: &mut TcpStream, buf: &mut [u8]) -> Result<usize, Error> {
    let mut n = 0;
    loop {
        if n == buf.len() {
            return Err(HandshakeError::NotEnoughCapacity.into());
        }

        let x = tcp.read(&mut buf[n..])?;
        if x == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        n += x;

        match Request::default().decode(&buf[..n]) {
            Ok(_) => return Ok(n),
            Err(HandshakeError::NotEnoughData) => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

fn handle(mut tcp: TcpStream) -> Result<(), Error> {
    let mut buf = vec![0u8; MAX_REQUEST_LEN];
    let n = read_request(&mut tcp, &mut buf)?;

    let mut request = Request::default();
    request.decode(&buf[..n])?;

    let mut endpoint = Endpoint::new(|frame: Frame| {
        info!("Received message: {}", String::from_utf8_lossy(&frame.payload));
        frame
    });

    let ret = endpoint.run(&request, |response| {
        tcp.write_all(&response.to_vec())?;
        tcp.try_clone()
    });

    if let Err(Error::Handshake(HandshakeError::NotAWebSocketUpgrade)) = ret {
        tcp.write_all(BAD_REQUEST)?;
    }

    ret
}

fn main() -> io::Result<()> {
    env_logger::init();

    let addr = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_ADDR.to_string());
    let lis = TcpListener::bind(&addr)?;
    info!("listen on {}", addr);

    for tcp in lis.incoming() {
        let tcp = match tcp {
            Ok(tcp) => tcp,
            Err(e) => {
                warn!("accept failed: {}", e);
                continue;
            }
        };

        let peer = match tcp.peer_addr() {
            Ok(peer) => peer,
            Err(_) => continue,
        };
        debug!("accept {}", peer);

        thread::spawn(move || match handle(tcp) {
            Ok(()) => debug!("{} closed", peer),
            Err(e) => warn!("{}: {}", peer, e),
        });
    }

    Ok(())
}
