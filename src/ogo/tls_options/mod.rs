//! TLS options module

mod api;
mod models;

pub use models::TlsOptions;
