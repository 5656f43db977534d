//! Client core for the Todoey to-do service.
//!
//! # Overview
//! Covers everything the app does between a user's input and the backend:
//! form validation, the persisted session identifier, request building and
//! response parsing for the seven API endpoints, per-screen controllers, and
//! navigation between the Home (login), Register, and Tasks screens.
//!
//! # Design
//! - Host-does-IO: the core builds `HttpRequest` values and parses
//!   `HttpResponse` values. A host-supplied `Transport` performs the actual
//!   round-trip, which keeps every controller deterministic under test.
//! - `TodoeyClient` is stateless and holds only `base_url`; `Gateway` pairs it
//!   with a transport for one-call-per-endpoint use.
//! - The local task list is a mirror of the server, refetched in full after
//!   every mutation.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod gateway;
pub mod http;
pub mod navigator;
pub mod screens;
pub mod session;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use client::TodoeyClient;
pub use error::{ApiError, SessionError, TransportError};
pub use gateway::Gateway;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use navigator::{ActiveScreen, Event, HomeEvent, Navigator, RegisterEvent, TasksEvent};
pub use screens::{Alert, Effect, RowState, Screen};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
pub use types::{CreatedTask, Credentials, SessionId, Task};
pub use validation::{is_valid_email, is_valid_password};
