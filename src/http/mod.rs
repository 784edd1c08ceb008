//! HTTP/1.1 protocol engine.
//!
//! # Architecture
//!
//! - **`connection`**: per-connection request/response state machine
//! - **`parser`**: parses one request from the front of a byte buffer
//! - **`headers`**: ordered, case-insensitive header set
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`encoding`**: gzip content negotiation for response bodies
//! - **`writer`**: serializes and writes responses to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌──────────────────┐
//!        │ AwaitingRequest  │ ← Read until one full request is buffered
//!        └──────┬───────────┘
//!               │ Request parsed
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← Route, handle, encode
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │ WritingResponse  │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ persistent → AwaitingRequest (same connection)
//!               └─ Connection: close → Closed
//! ```
//!
//! End of stream, a parse failure, the idle timeout or a write failure also
//! lead straight to `Closed`.

pub mod connection;
pub mod encoding;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
