//! Built-in resource handlers.

use std::path::{Component, Path, PathBuf};

use crate::http::request::Method;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

pub fn root() -> Response {
    Response::ok(Vec::new())
}

pub fn echo(rest: &str) -> Response {
    Response::text(rest.as_bytes())
}

pub fn user_agent(agent: &str) -> Response {
    Response::text(agent.as_bytes())
}

/// Reads and writes files under a single base directory.
///
/// Concurrent writes and reads of the same name from different connections
/// are not coordinated; the filesystem decides the outcome.
#[derive(Debug, Clone, Default)]
pub struct FileStore {
    base: Option<PathBuf>,
}

impl FileStore {
    pub fn new(base: Option<PathBuf>) -> Self {
        Self { base }
    }

    pub fn base(&self) -> Option<&Path> {
        self.base.as_deref()
    }

    /// GET reads, POST writes, anything else is 501.
    pub async fn handle(&self, method: &Method, name: &str, body: &[u8]) -> Response {
        match method {
            Method::GET => self.read(name).await,
            Method::POST => self.write(name, body).await,
            _ => Response::not_implemented(),
        }
    }

    pub async fn read(&self, name: &str) -> Response {
        let Some(path) = self.resolve(name) else {
            return Response::not_found();
        };

        match tokio::fs::read(&path).await {
            Ok(content) => ResponseBuilder::new(StatusCode::Ok)
                .header("Content-Type", "application/octet-stream")
                .body(content)
                .build(),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "file read failed");
                Response::not_found()
            }
        }
    }

    pub async fn write(&self, name: &str, body: &[u8]) -> Response {
        let Some(path) = self.resolve(name) else {
            return Response::not_found();
        };

        match tokio::fs::write(&path, body).await {
            Ok(()) => Response::created(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "file write failed");
                Response::internal_error()
            }
        }
    }

    /// Joins `name` onto the base directory. Returns `None` when no base is
    /// configured or the name could escape it.
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let base = self.base.as_ref()?;
        let relative = Path::new(name);

        let mut components = relative.components().peekable();
        components.peek()?;
        if !components.all(|c| matches!(c, Component::Normal(_) | Component::CurDir)) {
            return None;
        }

        Some(base.join(relative))
    }
}
