#![allow(dead_code)]

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// A response as seen by a client: raw head (status line and headers) and
/// the body framed by its Content-Length.
pub struct WireResponse {
    pub head: String,
    pub body: Vec<u8>,
}

impl WireResponse {
    pub fn status_line(&self) -> &str {
        self.head.lines().next().unwrap_or("")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (k, v) = line.split_once(':')?;
            k.eq_ignore_ascii_case(name).then(|| v.trim())
        })
    }
}

pub async fn read_response<R>(reader: &mut R) -> WireResponse
where
    R: AsyncBufRead + Unpin,
{
    let mut head = String::new();
    let mut content_length = 0;

    loop {
        let mut line = String::new();
        let n = reader.read_line(&mut line).await.unwrap();
        assert!(n > 0, "stream ended inside response head");

        if line == "\r\n" {
            break;
        }
        if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = v.trim().parse().unwrap();
        }
        head.push_str(&line);
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).await.unwrap();

    WireResponse { head, body }
}

/// True once the peer has closed its side and nothing else is buffered.
pub async fn at_eof<R>(reader: &mut R) -> bool
where
    R: AsyncBufRead + Unpin,
{
    reader.fill_buf().await.map(|b| b.is_empty()).unwrap_or(true)
}
