//! Courier - a small HTTP/1.1 server.
//!
//! Core library for the protocol engine, routing and the built-in handlers.

pub mod cli;
pub mod config;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
