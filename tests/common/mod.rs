//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a mock backend that answers 200 with the request path (plus query)
/// as the body, so tests can assert what the gateway forwarded upstream.
pub async fn start_echo_backend(addr: SocketAddr) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 8192];
                        let mut read = 0;
                        loop {
                            match socket.read(&mut buf[read..]).await {
                                Ok(0) => break,
                                Ok(n) => {
                                    read += n;
                                    if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                                        break;
                                    }
                                    if read == buf.len() {
                                        break;
                                    }
                                }
                                Err(_) => return,
                            }
                        }

                        let head = String::from_utf8_lossy(&buf[..read]);
                        let target = head.split_whitespace().nth(1).unwrap_or("?").to_string();

                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            target.len(),
                            target
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Write a one-service scheme document pointing at `backend_port` and
/// return its path.
pub fn write_scheme(file_name: &str, backend_port: u16) -> std::path::PathBuf {
    let scheme = format!(
        r#"{{
            "services": {{
                "users": {{
                    "urls": [{{ "host": "127.0.0.1", "port": {backend_port} }}],
                    "methods": {{ "profile": ["users:read"] }}
                }}
            }}
        }}"#
    );
    let path = std::env::temp_dir().join(file_name);
    std::fs::write(&path, scheme).unwrap();
    path
}
