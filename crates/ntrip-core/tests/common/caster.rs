//! Minimal in-process NTRIP caster for integration tests.
//!
//! Answers every connection with a fixed reply and forwards the raw request
//! head to the test over a channel, so header assertions can be made.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Reply {
    /// `HTTP/1.1 <status>` with the body and a Content-Length.
    Http { status: &'static str, body: String },
    /// Written verbatim, then the connection is closed (NTRIP 1.0 replies).
    Raw(String),
    /// Read the request, then never answer (for timeouts).
    Silent,
}

pub struct Caster {
    pub port: u16,
    requests: Receiver<String>,
}

impl Caster {
    /// Next request head received by the caster.
    pub fn request(&self) -> String {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("caster received no request")
    }
}

/// Starts a caster on an ephemeral port. Runs until the process exits.
pub fn start(reply: Reply) -> Caster {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let reply = reply.clone();
            let tx = tx.clone();
            thread::spawn(move || handle(stream, &reply, &tx));
        }
    });
    Caster {
        port,
        requests: rx,
    }
}

/// A port nothing listens on.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.local_addr().unwrap().port()
}

/// Sample sourcetable in the extended STR layout.
pub fn sourcetable() -> String {
    [
        "CAS;127.0.0.1;2101;TEST;Test caster;0;NZL;-41.29;174.78;0.0.0.0;0;http://example.com",
        "NET;TESTNET;Test;B;N;http://example.com;http://example.com;ops@example.com;",
        "STR;AUCK;Auckland;RTCM 3.2;1004(1),1006(10);2;GPS+GLO;TESTNET;NZL;-36.85;174.76;N;N;N;9600",
        "STR;WELL;Wellington;RTCM 3.2;1004(1);2;GPS;TESTNET;NZL;-41.29;174.78;Y;Y;Y;4800",
        "STR;VRS;;RTCM 3.2;;2;GPS+GLO+GAL;TESTNET;NZL;-41.00;174.00;Y;Y;N",
        "ENDSOURCETABLE",
        "",
    ]
    .join("\r\n")
}

fn handle(mut stream: TcpStream, reply: &Reply, requests: &Sender<String>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut head = Vec::new();
    let mut buf = [0u8; 4096];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    let _ = requests.send(String::from_utf8_lossy(&head).into_owned());

    match reply {
        Reply::Http { status, body } => {
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: gnss/sourcetable\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
        Reply::Raw(bytes) => {
            let _ = stream.write_all(bytes.as_bytes());
        }
        Reply::Silent => thread::sleep(Duration::from_secs(5)),
    }
}
