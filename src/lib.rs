//! HSK Gateway - data plane for the BuBu HSK vocabulary app
//!
//! Bridges public clients to a private upstream API with injected
//! credentials, and provides the client-side data layer: a JSON fetcher,
//! a single-flight words cache, and one-shot generation calls, following
//! type-driven development principles.

pub mod analytics;
pub mod application;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod proxy;

pub use application::Application;
pub use error::{Error, Result};
