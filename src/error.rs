use http::StatusCode;
use thiserror::Error;

/// The error type used across the router.
///
/// Registration-time problems (an invalid method token, a redefined built-in
/// pattern, an unresolvable reference) are configuration errors and always
/// propagate to the caller. Cache problems surface at the offending
/// `cache`/`load_cache` call. Dispatch failures are caught by
/// [`Router::run`](crate::Router::run): re-raised when the router runs in
/// debug mode, otherwise converted into the error handler's 500 response.
///
/// Every variant carries an HTTP status code through
/// [`status_code`](Error::status_code) so the boundary layer can report it
/// uniformly; anything without a more specific mapping reports 500.
#[derive(Error, Debug)]
pub enum Error {
    /// A declared method token outside the supported vocabulary.
    #[error("unsupported route method: '{0}'")]
    UnsupportedMethod(String),

    /// An effective request method which is not a plain HTTP verb.
    #[error("invalid request method: '{0}'")]
    InvalidRequestMethod(String),

    /// Attempt to redefine a built-in placeholder pattern.
    #[error("pattern '{0}' is built-in and can not be redefined")]
    ReservedPattern(String),

    /// A placeholder pattern fragment which does not compile as a regex.
    #[error("invalid pattern fragment for '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// A route template whose resolved form does not compile as a regex.
    #[error("could not create an exact match regex for the route path '{path}': {source}")]
    InvalidRoutePath {
        path: String,
        #[source]
        source: regex::Error,
    },

    /// `cache()` called while a closure callback is registered.
    #[error("route '{0}' uses a closure callback and can not be cached")]
    UncacheableRoute(String),

    /// `cache()` or `load_cache()` called without a configured cache path.
    #[error("no cache path configured")]
    MissingCachePath,

    /// Cache file read/write failure.
    #[error("route cache IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Cache snapshot encode/decode failure.
    #[error("route cache snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Configuration file parse failure.
    #[error("router configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// A middleware or handler failed during dispatch.
    #[error("dispatch error: {0}")]
    Dispatch(String),

    /// The host invoker could not resolve a handler or middleware reference.
    #[error("unresolvable reference: '{0}'")]
    UnresolvableReference(String),
}

impl Error {
    /// Creates a dispatch-time error from a message.
    pub fn dispatch<M: Into<String>>(msg: M) -> Error {
        Error::Dispatch(msg.into())
    }

    /// The HTTP status code associated with this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidRequestMethod(_) => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_errors_report_500() {
        let err = Error::dispatch("boom");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn invalid_request_method_reports_405() {
        let err = Error::InvalidRequestMethod("TELEPORT".into());
        assert_eq!(err.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
