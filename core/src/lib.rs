//! Blocking API client for the TaskMate task service.
//!
//! # Overview
//! `TaskApi` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network. `TaskClient` pairs it with an
//! `HttpTransport` (by default a `ureq` agent with a 30 second timeout) and
//! exposes the five task operations as plain method calls.
//!
//! # Design
//! - `TaskClient` is immutable after construction and shared via `Arc`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit and the
//!   status-code contract is testable without a server.
//! - No retries. Every failure is returned to the caller as an `ApiError`.

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use api::TaskApi;
pub use client::TaskClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, UreqTransport, REQUEST_TIMEOUT};
pub use types::{format_timestamp, CreateTask, Task, UpdateTask};
