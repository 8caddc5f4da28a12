//! Client-side shell for the JSON application API.
//!
//! # Overview
//! - `types`: the `{ code, message, data }` envelope every reply uses.
//! - `account`: the observable slot holding the signed-in user's profile.
//! - `client`: a prefixing, timeout-bounded JSON requester with `get`/`post`.
//! - `transport`: the default network transport (`ureq` on tokio's blocking
//!   pool).
//!
//! # Design
//! - Request building is pure (`ApiClient::build_request`); only the
//!   `Transport` touches the network, so tests swap in in-memory transports.
//! - The requester decodes JSON and never inspects the envelope `code`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod account;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod options;
pub mod transport;
pub mod types;

pub use account::{AccountPatch, AccountProfile, AccountSlot};
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{Credentials, HttpMethod, HttpRequest, HttpResponse, RedirectPolicy, Transport};
pub use options::{FetchDefaults, FetchOptions, RequestOptions};
pub use transport::UreqTransport;
pub use types::{
    AppDebugOutput, DebugAppResponse, PageInfo, Paginated, PaginatedEnvelope, ResponseCode, ResponseEnvelope,
};
