//! End-to-end tests over real loopback sockets.

mod common;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use courier::handlers::FileStore;
use courier::router::Router;
use courier::server::listener::serve;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use common::{at_eof, read_response};

async fn start(dir: &tempfile::TempDir) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = Router::new(Arc::new(FileStore::new(Some(dir.path().to_path_buf()))));

    tokio::spawn(serve(listener, router, Duration::from_secs(5)));
    addr
}

#[tokio::test]
async fn test_post_then_get_file() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start(&dir).await;
    let mut client = BufReader::new(TcpStream::connect(addr).await.unwrap());

    client
        .get_mut()
        .write_all(b"POST /files/test.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello")
        .await
        .unwrap();
    let created = read_response(&mut client).await;
    assert_eq!(created.status_line(), "HTTP/1.1 201 Created");

    client
        .get_mut()
        .write_all(b"GET /files/test.txt HTTP/1.1\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let fetched = read_response(&mut client).await;
    assert_eq!(fetched.status_line(), "HTTP/1.1 200 OK");
    assert_eq!(fetched.body, b"hello");
    assert_eq!(
        fetched.header("Content-Type"),
        Some("application/octet-stream")
    );
    assert_eq!(fetched.header("Content-Length"), Some("5"));
    assert!(at_eof(&mut client).await);
}

#[tokio::test]
async fn test_concurrent_connections_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start(&dir).await;

    // A stalled connection must not hold up the others.
    let mut stalled = TcpStream::connect(addr).await.unwrap();
    stalled.write_all(b"GET /echo/sta").await.unwrap();

    let mut tasks = Vec::new();
    for i in 0..8 {
        tasks.push(tokio::spawn(async move {
            let mut client = BufReader::new(TcpStream::connect(addr).await.unwrap());
            let req = format!(
                "GET /user-agent HTTP/1.1\r\nUser-Agent: client-{i}\r\nConnection: close\r\n\r\n"
            );
            client.get_mut().write_all(req.as_bytes()).await.unwrap();
            read_response(&mut client).await.body
        }));
    }

    for (i, task) in tasks.into_iter().enumerate() {
        assert_eq!(task.await.unwrap(), format!("client-{i}").into_bytes());
    }
}

#[tokio::test]
async fn test_bad_request_only_affects_its_connection() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start(&dir).await;

    let mut bad = BufReader::new(TcpStream::connect(addr).await.unwrap());
    bad.get_mut().write_all(b"NONSENSE\r\n\r\n").await.unwrap();
    assert!(at_eof(&mut bad).await);

    let mut good = BufReader::new(TcpStream::connect(addr).await.unwrap());
    good.get_mut()
        .write_all(b"GET /missing HTTP/1.1\r\n\r\n")
        .await
        .unwrap();
    let response = read_response(&mut good).await;
    assert_eq!(response.status_line(), "HTTP/1.1 404 Not Found");
    assert_eq!(response.header("Content-Length"), Some("0"));
}
