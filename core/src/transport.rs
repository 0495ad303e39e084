//! The seam between request assembly and network I/O.
//!
//! A [`Transport`] performs one blocking HTTP round-trip for a fully
//! resolved [`HttpRequest`]. `ureq::Agent` is the production
//! implementation; tests can substitute a recording fake.

use ureq::http::Request;
use ureq::Agent;

use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};

/// Executes HTTP requests synchronously.
///
/// Implementations are shared by every request issued through one
/// [`crate::Session`], possibly from several threads at once.
pub trait Transport: Send + Sync {
    /// Send `request` and read the whole response.
    ///
    /// Returns `Ok` for every HTTP status code; only failures to build,
    /// send or read the request are errors.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Agent used by [`crate::Session::new`].
///
/// Status codes are returned as data and the method string is forwarded
/// as-is, even when it is not one of the standard verbs.
pub fn default_agent() -> Agent {
    Agent::config_builder()
        .http_status_as_error(false)
        .allow_non_standard_methods(true)
        .build()
        .new_agent()
}

impl Transport for Agent {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = Request::builder()
            .method(request.method.as_str())
            .uri(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = match request.body {
            Some(body) => self.run(builder.body(body)?)?,
            None => self.run(builder.body(())?)?,
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        // ureq caps `read_to_vec` at 10 MiB by default; the whole body is wanted.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
