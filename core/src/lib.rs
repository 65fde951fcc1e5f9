//! API client core for a translation management service.
//!
//! # Overview
//! Fetches project metadata, lists project languages, retrieves a language's
//! strings and pushes updated strings back. Requests are built and responses
//! parsed without touching the network (host-does-IO pattern); a `Transport`
//! performs the round trip when the async `BilingualClient` is used.
//!
//! # Design
//! - `ApiClient` is immutable: token, base URL and `ClientConfig`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and testable with plain data.
//! - Successful bodies are returned as parsed; non-2xx responses become
//!   `ApiError::Remote` with the status, a fixed message and the JSON body.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod async_client;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use async_client::BilingualClient;
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::Transport;
pub use types::{Language, LanguageStrings, Project, StringEntry, StringRecord};
