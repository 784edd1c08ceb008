use thiserror::Error;

use crate::http::headers::Headers;
use crate::http::request::{Method, Request};

/// Upper bound on the request line plus headers.
pub const MAX_HEAD_BYTES: usize = 64 * 1024;

const DEFAULT_VERSION: &str = "HTTP/1.1";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The blank line ending the head has not arrived yet.
    #[error("request head is incomplete")]
    IncompleteHead,
    /// The head is complete but the body is still short.
    #[error("request body is incomplete: expected {expected} bytes, have {available}")]
    IncompleteBody { expected: usize, available: usize },
    #[error("malformed request line")]
    MalformedRequestLine,
    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),
    #[error("request head exceeds 64 KiB")]
    HeadTooLarge,
}

impl ParseError {
    /// True when more input may turn this error into a request.
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            ParseError::IncompleteHead | ParseError::IncompleteBody { .. }
        )
    }
}

/// Parses one request from the front of `buf`.
///
/// On success returns the request and the number of bytes it occupied, so
/// the caller can drain exactly that much. Lines may end in CRLF or a bare
/// LF. Header lines without a colon are skipped.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    let (lines, head_len) = split_head(buf)?;

    let (request_line, header_lines) = lines
        .split_first()
        .ok_or(ParseError::MalformedRequestLine)?;

    let request_line =
        std::str::from_utf8(request_line).map_err(|_| ParseError::MalformedRequestLine)?;
    let mut parts = request_line.split_whitespace();

    let method = parts.next().ok_or(ParseError::MalformedRequestLine)?;
    let path = parts.next().ok_or(ParseError::MalformedRequestLine)?;
    let version = parts.next().unwrap_or(DEFAULT_VERSION);

    let mut headers = Headers::new();
    for line in header_lines {
        let line = String::from_utf8_lossy(line);
        if let Some((key, value)) = line.split_once(':') {
            headers.insert(key.trim(), value.trim());
        }
    }

    let content_length = match headers.get("Content-Length") {
        Some(v) => v
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidContentLength(v.to_string()))?,
        None => 0,
    };

    let available = buf.len() - head_len;
    if available < content_length {
        return Err(ParseError::IncompleteBody {
            expected: content_length,
            available,
        });
    }

    let body = buf[head_len..head_len + content_length].to_vec();

    let request = Request {
        method: Method::parse(method),
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body,
    };

    Ok((request, head_len + content_length))
}

/// Splits the head into lines, without terminators, and returns the offset
/// just past the blank line.
fn split_head(buf: &[u8]) -> Result<(Vec<&[u8]>, usize), ParseError> {
    let mut lines = Vec::new();
    let mut pos = 0;

    loop {
        let Some(offset) = buf[pos..].iter().position(|&b| b == b'\n') else {
            return Err(if buf.len() > MAX_HEAD_BYTES {
                ParseError::HeadTooLarge
            } else {
                ParseError::IncompleteHead
            });
        };

        let raw = &buf[pos..pos + offset];
        let line = raw.strip_suffix(&b"\r"[..]).unwrap_or(raw);
        pos += offset + 1;

        if pos > MAX_HEAD_BYTES {
            return Err(ParseError::HeadTooLarge);
        }

        if line.is_empty() {
            if lines.is_empty() {
                // the first line is always the request line
                return Err(ParseError::MalformedRequestLine);
            }
            return Ok((lines, pos));
        }

        lines.push(line);
    }
}
