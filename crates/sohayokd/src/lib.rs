//! Sohayok Daemon - serves the community assistant over HTTP

pub mod routes;
pub mod server;

pub use server::{router, run, serve, AppState};
