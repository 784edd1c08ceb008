//! Response body compression driven by `Accept-Encoding`.
//!
//! Negotiation is token presence only: if `gzip` appears anywhere in the
//! list the body is compressed. Quality values and ordering are ignored, so
//! `gzip;q=0` still selects gzip.

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::http::response::Response;

pub const GZIP: &str = "gzip";

/// Returns true when the `Accept-Encoding` value lists `gzip`.
///
/// # Example
///
/// ```
/// # use courier::http::encoding::accepts_gzip;
/// assert!(accepts_gzip("deflate, gzip;q=0.5"));
/// assert!(!accepts_gzip("invalid-encoding"));
/// ```
pub fn accepts_gzip(accept_encoding: &str) -> bool {
    accept_encoding
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(|token| token.split(';').next().unwrap_or("").trim())
        .any(|token| token.eq_ignore_ascii_case(GZIP))
}

/// Compresses `body` into a gzip stream.
pub fn gzip(body: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(body)?;
    encoder.finish()
}

/// Applies content encoding to a response according to the request's
/// `Accept-Encoding` value.
///
/// Empty bodies are left alone and get no `Content-Encoding`. When the body
/// is compressed, `Content-Length` is set from the encoded bytes afterwards.
/// If compression fails the response goes out unencoded.
pub fn encode_response(response: &mut Response, accept_encoding: &str) {
    if response.body.is_empty() || !accepts_gzip(accept_encoding) {
        return;
    }

    match gzip(&response.body) {
        Ok(encoded) => {
            response.body = encoded;
            response.headers.insert("Content-Encoding", GZIP);
            response
                .headers
                .insert("Content-Length", response.body.len().to_string());
        }
        Err(e) => {
            tracing::warn!(error = %e, "gzip encoding failed, sending identity body");
        }
    }
}
