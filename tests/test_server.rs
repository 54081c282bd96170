//! Tests over real TCP sockets

use std::sync::Arc;

use lantern::app::{self, FsResourceLoader, InMemoryUserRepository, User};
use lantern::http::parser::Limits;
use lantern::server::Server;
use lantern::session::SessionStore;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

const STATIC_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

async fn start(limits: Limits) -> (std::net::SocketAddr, SessionStore) {
    let sessions = SessionStore::new();
    let users = Arc::new(InMemoryUserRepository::with_users([User::new(
        "gugu",
        "password",
        "hkkang@woowahan.com",
    )]));
    let router = app::router(
        sessions.clone(),
        users,
        Arc::new(FsResourceLoader::new(STATIC_ROOT)),
    );

    let server = Server::bind("127.0.0.1:0", router, limits).await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run());
    (addr, sessions)
}

async fn send(addr: std::net::SocketAddr, raw: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();
    let mut out = String::new();
    stream.read_to_string(&mut out).await.unwrap();
    out
}

#[tokio::test]
async fn test_server_answers_and_closes() {
    let (addr, _) = start(Limits::default()).await;

    let response = send(
        addr,
        "GET / HTTP/1.1\r\nHost: localhost\r\nConnection: keep-alive\r\n\r\n",
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 200 OK \r\n"));
    assert!(response.ends_with("Hello world!"));
}

#[tokio::test]
async fn test_session_survives_across_connections() {
    let (addr, sessions) = start(Limits::default()).await;
    let body = "account=gugu&password=password";

    let login = send(
        addr,
        &format!(
            "POST /login HTTP/1.1\r\nHost: localhost\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        ),
    )
    .await;
    assert!(login.starts_with("HTTP/1.1 302 FOUND \r\n"));
    assert_eq!(sessions.len(), 1);

    let marker = "Set-Cookie: JSESSIONID=";
    let start = login.find(marker).unwrap() + marker.len();
    let token = &login[start..start + login[start..].find(' ').unwrap()];

    let revisit = send(
        addr,
        &format!("GET /login HTTP/1.1\r\nHost: localhost\r\nCookie: JSESSIONID={}\r\n\r\n", token),
    )
    .await;
    assert!(revisit.starts_with("HTTP/1.1 302 FOUND \r\n"));
    assert!(revisit.contains("Location: /index.html"));
}

#[tokio::test]
async fn test_request_split_across_writes() {
    let (addr, _) = start(Limits::default()).await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    stream.write_all(b"GET / HT").await.unwrap();
    stream.flush().await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    stream.write_all(b"TP/1.1\r\nHost: localhost\r\n\r\n").await.unwrap();

    let mut out = String::new();
    stream.read_to_string(&mut out).await.unwrap();
    assert!(out.starts_with("HTTP/1.1 200 OK \r\n"));
}

#[tokio::test]
async fn test_oversized_head_is_rejected() {
    let (addr, _) = start(Limits { max_head_bytes: 64, max_body_bytes: 1024 }).await;

    let padding = "a".repeat(128);
    let response = send(addr, &format!("GET / HTTP/1.1\r\nX-Padding: {}\r\n\r\n", padding)).await;

    assert!(response.starts_with("HTTP/1.1 400 BAD_REQUEST \r\n"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_logins() {
    let (addr, sessions) = start(Limits::default()).await;
    let body = "account=gugu&password=password";
    let raw = format!(
        "POST /login HTTP/1.1\r\nHost: localhost\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    );

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let raw = raw.clone();
            tokio::spawn(async move { send(addr, &raw).await })
        })
        .collect();

    for task in tasks {
        assert!(task.await.unwrap().starts_with("HTTP/1.1 302 FOUND \r\n"));
    }
    assert_eq!(sessions.len(), 16);
}
