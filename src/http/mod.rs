//! HTTP server module.
//!
//! Serves plain HTTP only; TLS termination is the reverse proxy's job.
//! Includes graceful shutdown on SIGTERM/SIGINT with connection draining.

mod server;
mod shutdown;

pub use server::start_server;
