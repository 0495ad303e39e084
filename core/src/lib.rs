//! Synchronous HTTP requests assembled from typed options.
//!
//! # Overview
//! Instead of building a transport request field by field, a caller passes
//! a URL and a list of [`RequestOption`] values (headers, query parameters,
//! a form or raw body, cookies) to a [`Session`] verb and gets back a
//! populated [`HttpResponse`].
//!
//! # Design
//! - [`prepare_request`] folds the options into a [`PreparedRequest`]
//!   without touching the network.
//! - [`HttpRequest::from_prepared`] resolves that into the exact headers
//!   and body that go on the wire, still without I/O.
//! - A [`Transport`] (by default a `ureq::Agent`) executes the request.
//!   The session owns one transport for its lifetime.
//! - Failures to build or deliver a request are [`Error`]s; HTTP status
//!   codes never are.

pub mod error;
pub mod http;
pub mod option;
pub mod request;
pub mod session;
pub mod transport;
pub mod values;

pub use error::{Error, Result};
pub use http::{HttpRequest, HttpResponse};
pub use option::{Cookie, Cookies, Data, DataForm, Headers, Params, RequestOption};
pub use request::{prepare_request, PreparedRequest};
pub use session::Session;
pub use transport::{default_agent, Transport};
pub use values::Values;
