//! Client core for the todo service.
//!
//! # Overview
//! `TodoClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). A `Transport` performs
//! the round-trip, and `TodoService` turns each UI action into one API call
//! plus a reconciled copy of the caller's list.
//!
//! # Design
//! - `TodoClient` is stateless: it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - `TodoService` never owns the list; callers pass it in and get it back.
//! - DTOs are defined independently from the server crate; integration tests
//!   catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;

pub use client::{TodoClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::{Outcome, TodoService};
pub use transport::{ReqwestTransport, Transport};
pub use types::{CreateTodo, DeletedCount, Todo, UpdateTodo};
