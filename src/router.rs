//! Maps a request onto one of the built-in resources.
//!
//! Matching is first-match-wins in this order:
//!
//! | Path              | Route                    |
//! |-------------------|--------------------------|
//! | `/` (exact)       | [`Route::Root`]          |
//! | `/echo/<rest>`    | [`Route::Echo`]          |
//! | `/user-agent...`  | [`Route::UserAgent`]     |
//! | `/files/<name>`   | [`Route::Files`]         |
//! | anything else     | [`Route::NotFound`]      |

use std::sync::Arc;

use crate::handlers::{self, FileStore};
use crate::http::request::Request;
use crate::http::response::Response;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Root,
    /// Everything after `/echo/`, verbatim.
    Echo(&'a str),
    UserAgent,
    /// Everything after `/files/`, verbatim.
    Files(&'a str),
    NotFound,
}

/// Resolves a raw request path to a route. The method plays no part here;
/// the file handler looks at it itself.
///
/// # Example
///
/// ```
/// # use courier::router::{resolve, Route};
/// assert_eq!(resolve("/echo/abc"), Route::Echo("abc"));
/// assert_eq!(resolve("/nope"), Route::NotFound);
/// ```
pub fn resolve(path: &str) -> Route<'_> {
    if path == "/" {
        Route::Root
    } else if let Some(rest) = path.strip_prefix("/echo/") {
        Route::Echo(rest)
    } else if path.starts_with("/user-agent") {
        Route::UserAgent
    } else if let Some(name) = path.strip_prefix("/files/") {
        Route::Files(name)
    } else {
        Route::NotFound
    }
}

/// Dispatches requests to the handlers, carrying the state they need.
#[derive(Debug, Clone)]
pub struct Router {
    files: Arc<FileStore>,
}

impl Router {
    pub fn new(files: Arc<FileStore>) -> Self {
        Self { files }
    }

    pub async fn dispatch(&self, req: &Request) -> Response {
        match resolve(&req.path) {
            Route::Root => handlers::root(),
            Route::Echo(rest) => handlers::echo(rest),
            Route::UserAgent => handlers::user_agent(req.header("User-Agent").unwrap_or("")),
            Route::Files(name) => self.files.handle(&req.method, name, &req.body).await,
            Route::NotFound => Response::not_found(),
        }
    }
}
