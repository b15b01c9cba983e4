//! Shared helpers for unit tests that need a local mock server.

pub mod socket_guard;
