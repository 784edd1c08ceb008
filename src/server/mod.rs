//! Accept loop and connection spawning.

pub mod listener;
