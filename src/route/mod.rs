use crate::helpers;
use crate::method::Method;
use crate::middleware::Middlewares;
use crate::request::Request;
use crate::response::Response;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

lazy_static! {
    static ref NON_WORD_RE: Regex = Regex::new(r"[^0-9a-zA-Z_]").unwrap();
}

/// A boxed synchronous handler: receives the request and the ordered route
/// parameter values, returns a buffered response.
pub type HandlerFn = Arc<dyn Fn(&mut Request, &[String]) -> crate::Result<Response> + Send + Sync + 'static>;

/// A route callback: either an inline closure or an opaque
/// `"Controller@method"` reference resolved by the host
/// [`Invoker`](crate::Invoker) at dispatch time.
///
/// Only reference callbacks can be written to the route cache.
#[derive(Clone)]
pub enum Callback {
    Closure(HandlerFn),
    Reference(String),
}

impl Callback {
    /// Wraps a closure.
    pub fn from_fn<F>(handler: F) -> Callback
    where
        F: Fn(&mut Request, &[String]) -> crate::Result<Response> + Send + Sync + 'static,
    {
        Callback::Closure(Arc::new(handler))
    }

    /// Wraps a `"Controller@method"` string reference.
    pub fn reference<S: Into<String>>(reference: S) -> Callback {
        Callback::Reference(reference.into())
    }

    pub(crate) fn as_reference(&self) -> Option<&str> {
        match self {
            Callback::Reference(reference) => Some(reference),
            Callback::Closure(_) => None,
        }
    }
}

impl From<&str> for Callback {
    fn from(reference: &str) -> Callback {
        Callback::reference(reference)
    }
}

impl From<String> for Callback {
    fn from(reference: String) -> Callback {
        Callback::Reference(reference)
    }
}

impl Debug for Callback {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Closure(_) => f.write_str("<closure>"),
            Callback::Reference(reference) => write!(f, "{:?}", reference),
        }
    }
}

/// One registered route record: a single method+path combination with its
/// callback and middleware chains.
///
/// Records are created through the [`Router`](crate::Router) registration
/// API, never directly.
#[derive(Clone)]
pub struct Route {
    pub(crate) path: String,
    pub(crate) method: Method,
    pub(crate) callback: Callback,
    pub(crate) name: Option<String>,
    pub(crate) before: Middlewares,
    pub(crate) after: Middlewares,
    pub(crate) group_segments: Vec<String>,
}

impl Route {
    pub(crate) fn new(
        path: String,
        method: Method,
        callback: Callback,
        name: Option<String>,
        before: Middlewares,
        after: Middlewares,
        group_segments: Vec<String>,
    ) -> Route {
        let name = name.or_else(|| callback.as_reference().map(derive_name));
        Route {
            path,
            method,
            callback,
            name,
            before,
            after,
            group_segments,
        }
    }

    /// The normalized URI template.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// The human identifier, auto-derived from a string callback when not
    /// given explicitly.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn before(&self) -> &Middlewares {
        &self.before
    }

    pub fn after(&self) -> &Middlewares {
        &self.after
    }

    /// The enclosing group prefixes, outermost first.
    pub fn group_segments(&self) -> &[String] {
        &self.group_segments
    }

    /// The `"Controller@method"` reference, when the callback is one.
    pub fn callback_reference(&self) -> Option<&str> {
        self.callback.as_reference()
    }

    pub(crate) fn has_placeholder(&self) -> bool {
        self.path.contains(':')
    }

    /// How many leading capture groups belong to group-level placeholders
    /// rather than route-local ones: one per enclosing group segment which
    /// itself contains a placeholder.
    pub(crate) fn group_capture_count(&self) -> usize {
        self.group_segments.iter().filter(|segment| segment.contains(':')).count()
    }
}

impl Debug for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ path: {:?}, method: {:?}, callback: {:?}, name: {:?}, before: {:?}, after: {:?} }}",
            self.path, self.method, self.callback, self.name, self.before, self.after
        )
    }
}

/// Derives a route name from a callback reference: every non-word character
/// becomes a dot and the result is lowercased.
pub(crate) fn derive_name(reference: &str) -> String {
    NON_WORD_RE.replace_all(reference, ".").to_lowercase()
}

/// Expands optional-segment markers: each segment with a trailing `?` adds
/// one incrementally-longer registration, so `/a/b?/c?` yields `/a`, `/a/b`
/// and `/a/b/c`.
pub(crate) fn expand_optional_segments(path: &str) -> Vec<String> {
    if !path.contains('?') {
        return vec![helpers::normalize_path(path)];
    }

    let trimmed = path.trim_matches('/');
    let segments: Vec<&str> = trimmed.split('/').collect();
    let first_optional = segments
        .iter()
        .position(|segment| segment.ends_with('?'))
        .unwrap_or(segments.len());

    let mut expanded = Vec::with_capacity(segments.len() - first_optional + 1);
    for end in first_optional..=segments.len() {
        let parts: Vec<&str> = segments[..end].iter().map(|segment| segment.trim_end_matches('?')).collect();
        expanded.push(helpers::normalize_path(&format!("/{}", parts.join("/"))));
    }
    expanded
}
