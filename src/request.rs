use crate::constants::{METHOD_OVERRIDE_FIELD, XHR_HEADER, XHR_HEADER_VALUE};
use crate::helpers;
use crate::method::Method;
use std::collections::HashMap;

/// An already parsed inbound request, handed to the router by the host.
///
/// The router does not read sockets or headers off the wire; the host builds
/// a `Request` and passes it to [`Router::run`](crate::Router::run). Header
/// names are stored lowercased.
///
/// # Examples
///
/// ```
/// use routier::Request;
///
/// let req = Request::new("POST", "/users/42?full=1")
///     .with_header("X-Requested-With", "XMLHttpRequest")
///     .with_form_field("_method", "PUT");
///
/// assert!(req.is_xhr());
/// assert_eq!(req.form_field("_method"), Some("PUT"));
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    method: String,
    uri: String,
    script_name: Option<String>,
    headers: HashMap<String, String>,
    form: HashMap<String, String>,
}

impl Request {
    /// Creates a request from the declared HTTP method and the raw request
    /// URI (query string included).
    pub fn new<M: Into<String>, U: Into<String>>(method: M, uri: U) -> Request {
        Request {
            method: method.into(),
            uri: uri.into(),
            script_name: None,
            headers: HashMap::new(),
            form: HashMap::new(),
        }
    }

    /// Sets the script path the application is served through (e.g.
    /// `/app/index.php`); it is stripped when resolving the request path.
    pub fn with_script_name<S: Into<String>>(mut self, script_name: S) -> Request {
        self.script_name = Some(script_name.into());
        self
    }

    pub fn with_header<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Request {
        self.headers.insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_form_field<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Request {
        self.form.insert(name.into(), value.into());
        self
    }

    /// The declared (pre-override) HTTP method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The raw request URI.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn form_field(&self, name: &str) -> Option<&str> {
        self.form.get(name).map(String::as_str)
    }

    /// Whether this request is an AJAX/XHR call.
    pub fn is_xhr(&self) -> bool {
        self.header(XHR_HEADER) == Some(XHR_HEADER_VALUE)
    }

    /// The effective HTTP method: the declared one, overridden by a
    /// `_method` form field when present, upper-cased and validated against
    /// the plain verb set.
    pub(crate) fn resolve_method(&self) -> crate::Result<String> {
        let method = self
            .form_field(METHOD_OVERRIDE_FIELD)
            .unwrap_or(&self.method)
            .to_ascii_uppercase();
        Method::validate_request_method(&method)?;
        Ok(method)
    }

    /// The effective request path: the raw URI with the script
    /// directory/filename and the configured base folder stripped, the query
    /// string discarded, and the remainder normalized.
    pub(crate) fn resolve_path(&self, base_folder: &str) -> String {
        let mut path = self.uri.split('?').next().unwrap_or("").to_string();

        if let Some(script) = &self.script_name {
            let script = script.trim_end_matches('/');
            if let Some(slash) = script.rfind('/') {
                let dir = &script[..slash];
                let file = &script[slash..];
                if !dir.is_empty() {
                    if let Some(rest) = path.strip_prefix(dir) {
                        path = rest.to_string();
                    }
                }
                if let Some(rest) = path.strip_prefix(file) {
                    path = rest.to_string();
                }
            }
        }

        if !base_folder.is_empty() {
            let base = format!("/{}", base_folder.trim_matches('/'));
            if let Some(rest) = path.strip_prefix(&base) {
                path = rest.to_string();
            }
        }

        helpers::normalize_path(&path)
    }
}
