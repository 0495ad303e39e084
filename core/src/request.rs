//! Folding request options into a request descriptor.

use crate::option::{Cookie, RequestOption};
use crate::values::Values;

/// A request assembled from a method, a URL and a list of options, before
/// it is turned into a wire request.
///
/// Built by [`prepare_request`]. Fields stay `None` unless the matching
/// option was supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: String,
    pub url: String,
    pub headers: Option<Values>,
    pub params: Option<Values>,
    pub form: Option<Values>,
    pub data: Option<Vec<u8>>,
    pub cookies: Option<Vec<Cookie>>,
}

impl PreparedRequest {
    fn set_params(&mut self, params: Values) {
        // Appended literally: an existing query string is not merged, and a
        // second `Params` option yields `?a=1?b=2`.
        self.url.push('?');
        self.url.push_str(&params.encode());
        self.params = Some(params);
    }

    fn apply(&mut self, option: RequestOption) {
        match option {
            RequestOption::Headers(h) => self.headers = Some(h.0),
            RequestOption::Params(p) => self.set_params(p.0),
            RequestOption::DataForm(f) => self.form = Some(f.0),
            RequestOption::Data(d) => self.data = Some(d.0),
            RequestOption::Cookies(c) => {
                self.cookies = Some(c.0.into_iter().map(|(name, value)| Cookie { name, value }).collect())
            }
        }
    }
}

/// Build a [`PreparedRequest`] from `method`, `url` and `options`.
///
/// Options are applied in order; each kind owns one field, so a later
/// option of the same kind replaces an earlier one. Neither the method nor
/// the URL is validated here.
pub fn prepare_request<I>(method: &str, url: &str, options: I) -> PreparedRequest
where
    I: IntoIterator<Item = RequestOption>,
{
    let mut req = PreparedRequest {
        method: method.to_string(),
        url: url.to_string(),
        ..Default::default()
    };
    for option in options {
        req.apply(option);
    }
    req
}
