//! The user-facing entry point for issuing requests.
//!
//! # Design
//! A `Session` owns one transport for its whole life and never mutates it,
//! so every request issued through the session, from any thread, shares
//! the same agent and its connection pool. No other state (cookies,
//! defaults) carries over from one request to the next.

use tracing::{debug, warn};
use ureq::Agent;

use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};
use crate::option::RequestOption;
use crate::request::{prepare_request, PreparedRequest};
use crate::transport::{default_agent, Transport};

/// Issues requests assembled from typed options.
///
/// ```no_run
/// use direwolf::{Headers, Params, Session};
///
/// # fn main() -> direwolf::Result<()> {
/// let session = Session::new();
/// let resp = session.get(
///     "http://example.com/search",
///     [
///         Params::new().add("q", "hello world").into(),
///         Headers::new().add("Accept", "text/html").into(),
///     ],
/// )?;
/// println!("{} {}", resp.status, resp.text());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Session<T = Agent> {
    transport: T,
}

impl Session<Agent> {
    pub fn new() -> Self {
        Self::with_agent(default_agent())
    }

    /// Use a caller-configured `ureq` agent.
    ///
    /// Leave `http_status_as_error` off on that agent if 4xx/5xx responses
    /// should come back as responses rather than errors.
    pub fn with_agent(agent: Agent) -> Self {
        Self { transport: agent }
    }
}

impl Default for Session<Agent> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> Session<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn get<I>(&self, url: &str, options: I) -> Result<HttpResponse>
    where
        I: IntoIterator<Item = RequestOption>,
    {
        self.request("GET", url, options)
    }

    pub fn post<I>(&self, url: &str, options: I) -> Result<HttpResponse>
    where
        I: IntoIterator<Item = RequestOption>,
    {
        self.request("POST", url, options)
    }

    /// Issue a request with any method string; the method is forwarded
    /// unchanged.
    pub fn request<I>(&self, method: &str, url: &str, options: I) -> Result<HttpResponse>
    where
        I: IntoIterator<Item = RequestOption>,
    {
        let prepared = prepare_request(method, url, options);
        self.send(&prepared)
    }

    /// Dispatch an already prepared request.
    pub fn send(&self, prepared: &PreparedRequest) -> Result<HttpResponse> {
        let request = HttpRequest::from_prepared(prepared);
        debug!(method = %request.method, url = %request.url, headers = request.headers.len(), "sending request");

        match self.transport.execute(request) {
            Ok(response) => {
                debug!(status = response.status, bytes = response.body.len(), "received response");
                Ok(response)
            }
            Err(err) => {
                warn!(method = %prepared.method, url = %prepared.url, error = %err, "request failed");
                Err(err)
            }
        }
    }
}
