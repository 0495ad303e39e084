//! Plain-data HTTP requests and responses.
//!
//! # Design
//! `HttpRequest` is the fully resolved wire request: every header the
//! transport will send, in order, and the exact body bytes. Translating a
//! [`PreparedRequest`] into one happens here, without I/O, so the
//! header/body rules can be tested on their own. A [`crate::Transport`]
//! only has to execute it and hand back an `HttpResponse`.

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::request::PreparedRequest;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_LENGTH: &str = "Content-Length";
pub const COOKIE: &str = "Cookie";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Resolve a descriptor into the request that goes on the wire.
    ///
    /// Caller headers are copied first. A form body adds `Content-Type` and
    /// `Content-Length`; a raw body adds `Content-Length` and is only used
    /// when no form body is present. Cookies are folded into one `Cookie`
    /// header, appended to any `Cookie` header the caller set.
    pub fn from_prepared(prepared: &PreparedRequest) -> Self {
        let mut req = HttpRequest {
            method: prepared.method.clone(),
            url: prepared.url.clone(),
            headers: Vec::new(),
            body: None,
        };

        if let Some(headers) = &prepared.headers {
            req.headers = headers
                .pairs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
        }

        if let Some(form) = &prepared.form {
            let body = form.encode().into_bytes();
            req.headers.push((CONTENT_TYPE.to_string(), FORM_URLENCODED.to_string()));
            req.set_body(body);
        } else if let Some(data) = &prepared.data {
            req.set_body(data.clone());
        }

        if let Some(cookies) = &prepared.cookies {
            for cookie in cookies {
                req.add_cookie(&cookie.name, &cookie.value);
            }
        }

        req
    }

    fn set_body(&mut self, body: Vec<u8>) {
        self.headers.push((CONTENT_LENGTH.to_string(), body.len().to_string()));
        self.body = Some(body);
    }

    /// Append `name=value` to the `Cookie` header.
    ///
    /// Both halves are sanitized first so neither can end the pair early or
    /// start another one. A name with nothing left after sanitizing is
    /// skipped.
    fn add_cookie(&mut self, name: &str, value: &str) {
        let name = sanitize_cookie_name(name);
        if name.is_empty() {
            return;
        }
        let pair = format!("{name}={}", sanitize_cookie_value(value));
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(COOKIE))
        {
            Some((_, existing)) => {
                existing.push_str("; ");
                existing.push_str(&pair);
            }
            None => self.headers.push((COOKIE.to_string(), pair)),
        }
    }

    /// First value of header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response described as plain data.
///
/// Any status code, including 4xx and 5xx, arrives here rather than as an
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First value of header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Body as text; invalid UTF-8 is replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Keep only RFC 7230 token characters.
fn sanitize_cookie_name(name: &str) -> String {
    name.chars()
        .filter(|&c| c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c))
        .collect()
}

/// Drop control, non-ASCII, `"`, `;` and `\` characters; quote the rest if
/// it holds a space or a comma.
fn sanitize_cookie_value(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|&c| (' '..='~').contains(&c) && !matches!(c, '"' | ';' | '\\'))
        .collect();
    if cleaned.contains([' ', ',']) {
        format!("\"{cleaned}\"")
    } else {
        cleaned
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::{Cookies, Data, DataForm, Headers};
    use crate::request::prepare_request;
    use crate::Error;

    fn resolve(options: Vec<crate::RequestOption>) -> HttpRequest {
        HttpRequest::from_prepared(&prepare_request("POST", "http://example.com", options))
    }

    #[test]
    fn bare_request_has_no_headers_or_body() {
        let req = HttpRequest::from_prepared(&prepare_request("GET", "http://example.com/x", []));
        assert_eq!(req.method, "GET");
        assert_eq!(req.url, "http://example.com/x");
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn multi_valued_header_is_sent_once_per_value() {
        let req = resolve(vec![Headers::new().add("X", "a").add("X", "b").into()]);
        assert_eq!(
            req.headers,
            vec![
                ("X".to_string(), "a".to_string()),
                ("X".to_string(), "b".to_string())
            ]
        );
    }

    #[test]
    fn form_body_sets_content_type_and_length() {
        let req = resolve(vec![DataForm::new().add("name", "Alice").add("age", "30").into()]);
        assert_eq!(req.header("content-type"), Some(FORM_URLENCODED));
        assert_eq!(req.body.as_deref(), Some(&b"age=30&name=Alice"[..]));
        assert_eq!(req.header("Content-Length"), Some("17"));
    }

    #[test]
    fn form_content_type_is_added_after_caller_headers() {
        let req = resolve(vec![
            Headers::new().add("Content-Type", "text/plain").into(),
            DataForm::new().add("a", "1").into(),
        ]);
        let types: Vec<&str> = req
            .headers
            .iter()
            .filter(|(k, _)| k == CONTENT_TYPE)
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(types, ["text/plain", FORM_URLENCODED]);
    }

    #[test]
    fn raw_data_becomes_body() {
        let req = resolve(vec![Data::from(r#"{"k":1}"#).into()]);
        assert_eq!(req.body.as_deref(), Some(&br#"{"k":1}"#[..]));
        assert_eq!(req.header(CONTENT_LENGTH), Some("7"));
        assert_eq!(req.header(CONTENT_TYPE), None);
    }

    #[test]
    fn form_wins_over_raw_data() {
        let req = resolve(vec![Data::from("raw").into(), DataForm::new().add("a", "1").into()]);
        assert_eq!(req.body.as_deref(), Some(&b"a=1"[..]));
    }

    #[test]
    fn cookies_fold_into_one_header() {
        let req = resolve(vec![Cookies::new().add("session", "abc123").add("lang", "en").into()]);
        assert_eq!(req.header(COOKIE), Some("lang=en; session=abc123"));
    }

    #[test]
    fn cookies_append_to_caller_cookie_header() {
        let req = resolve(vec![
            Headers::new().add("cookie", "pre=1").into(),
            Cookies::new().add("session", "abc123").into(),
        ]);
        assert_eq!(req.header(COOKIE), Some("pre=1; session=abc123"));
        assert_eq!(req.headers.len(), 1);
    }

    #[test]
    fn cookie_value_cannot_smuggle_another_cookie() {
        let req = resolve(vec![Cookies::new().add("a", "1; admin=true").into()]);
        assert_eq!(req.header(COOKIE), Some("a=\"1 admin=true\""));
    }

    #[test]
    fn cookie_value_with_space_or_comma_is_quoted() {
        let req = resolve(vec![Cookies::new().add("a", "x y").add("b", "1,2").into()]);
        assert_eq!(req.header(COOKIE), Some("a=\"x y\"; b=\"1,2\""));
    }

    #[test]
    fn cookie_value_drops_quotes_backslashes_and_controls() {
        let req = resolve(vec![Cookies::new().add("a", "q\"u\\o\r\nte\u{e9}").into()]);
        assert_eq!(req.header(COOKIE), Some("a=quote"));
    }

    #[test]
    fn cookie_name_keeps_only_token_characters() {
        let req = resolve(vec![Cookies::new().add("b\"; c=", "x").add("s\nid", "1").into()]);
        assert_eq!(req.header(COOKIE), Some("bc=x; sid=1"));
    }

    #[test]
    fn cookie_with_empty_sanitized_name_is_skipped() {
        let req = resolve(vec![Cookies::new().add(";=", "x").into()]);
        assert_eq!(req.header(COOKIE), None);
    }

    #[test]
    fn response_helpers() {
        let resp = HttpResponse {
            status: 201,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: br#"{"ok":true}"#.to_vec(),
        };
        assert!(resp.is_success());
        assert_eq!(resp.header("Content-Type"), Some("application/json"));
        assert_eq!(resp.text(), r#"{"ok":true}"#);
        let v: serde_json::Value = resp.json().unwrap();
        assert_eq!(v["ok"], true);
    }

    #[test]
    fn non_success_status_is_plain_data() {
        let resp = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: Vec::new(),
        };
        assert!(!resp.is_success());
    }

    #[test]
    fn json_decode_failure_is_reported() {
        let resp = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: b"not json".to_vec(),
        };
        let err = resp.json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
