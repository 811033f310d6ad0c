use crate::Error;
use crate::constants::{REQUEST_METHODS, SUPPORTED_METHODS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A route method token.
///
/// Besides the plain HTTP verbs, routes may be declared with three kinds of
/// extended token:
///
/// * [`Any`](Method::Any) matches every request method.
/// * [`Ajax`](Method::Ajax) matches any XHR request.
/// * `X`-prefixed verbs (e.g. [`XPost`](Method::XPost)) match XHR requests
///   carrying that verb only.
///
/// Only plain verbs are legal as an effective *request* method; the extended
/// tokens exist on the declaration side of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
    Any,
    Ajax,
    XGet,
    XPost,
    XPut,
    XDelete,
    XPatch,
}

impl Method {
    /// The canonical uppercase token for this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Patch => "PATCH",
            Method::Any => "ANY",
            Method::Ajax => "AJAX",
            Method::XGet => "XGET",
            Method::XPost => "XPOST",
            Method::XPut => "XPUT",
            Method::XDelete => "XDELETE",
            Method::XPatch => "XPATCH",
        }
    }

    /// The plain verb behind an `X`-prefixed token, if any.
    fn xhr_verb(&self) -> Option<&'static str> {
        match self {
            Method::XGet => Some("GET"),
            Method::XPost => Some("POST"),
            Method::XPut => Some("PUT"),
            Method::XDelete => Some("DELETE"),
            Method::XPatch => Some("PATCH"),
            _ => None,
        }
    }

    /// Whether a record declared with this token accepts a request with the
    /// given effective method and XHR flag.
    pub(crate) fn accepts(&self, request_method: &str, xhr: bool) -> bool {
        match self {
            Method::Any => true,
            Method::Ajax => xhr,
            m => {
                if let Some(verb) = m.xhr_verb() {
                    xhr && verb == request_method
                } else {
                    m.as_str() == request_method
                }
            }
        }
    }

    /// Parses a pipe-delimited method specification (e.g. `"GET|POST"`) into
    /// individual tokens. Fails on the first token outside the supported
    /// vocabulary.
    pub(crate) fn parse_spec(spec: &str) -> crate::Result<Vec<Method>> {
        spec.split('|')
            .map(|token| token.trim().parse())
            .collect()
    }

    /// Validates an effective request method: only plain HTTP verbs are
    /// accepted here.
    pub(crate) fn validate_request_method(method: &str) -> crate::Result<()> {
        if REQUEST_METHODS.contains(&method) {
            Ok(())
        } else {
            Err(Error::InvalidRequestMethod(method.to_string()))
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let upper = token.to_ascii_uppercase();
        match upper.as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "HEAD" => Ok(Method::Head),
            "OPTIONS" => Ok(Method::Options),
            "PATCH" => Ok(Method::Patch),
            "ANY" => Ok(Method::Any),
            "AJAX" => Ok(Method::Ajax),
            "XGET" => Ok(Method::XGet),
            "XPOST" => Ok(Method::XPost),
            "XPUT" => Ok(Method::XPut),
            "XDELETE" => Ok(Method::XDelete),
            "XPATCH" => Ok(Method::XPatch),
            _ => Err(Error::UnsupportedMethod(token.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finds the method token matching a case-insensitive prefix of `name`,
/// longest token first, together with the remainder of the name. Used by
/// controller-based registration.
pub(crate) fn from_action_prefix(name: &str) -> (Method, String) {
    let upper = name.to_ascii_uppercase();
    for token in &SUPPORTED_METHODS {
        if upper.starts_with(token) {
            // The token list is ordered longest-first, so the first hit is
            // the most specific one.
            let method = token.parse().expect("supported token must parse");
            return (method, name[token.len()..].to_string());
        }
    }
    (Method::Any, name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pipe_delimited_specs() {
        let methods = Method::parse_spec("GET|post| Put").unwrap();
        assert_eq!(methods, vec![Method::Get, Method::Post, Method::Put]);
    }

    #[test]
    fn rejects_unknown_tokens() {
        assert!(matches!(
            Method::parse_spec("GET|TELEPORT"),
            Err(Error::UnsupportedMethod(token)) if token == "TELEPORT"
        ));
    }

    #[test]
    fn any_accepts_everything() {
        assert!(Method::Any.accepts("GET", false));
        assert!(Method::Any.accepts("DELETE", true));
    }

    #[test]
    fn ajax_requires_xhr() {
        assert!(Method::Ajax.accepts("POST", true));
        assert!(!Method::Ajax.accepts("POST", false));
    }

    #[test]
    fn x_prefixed_requires_xhr_and_verb() {
        assert!(Method::XPost.accepts("POST", true));
        assert!(!Method::XPost.accepts("POST", false));
        assert!(!Method::XPost.accepts("GET", true));
    }

    #[test]
    fn plain_verbs_match_verbatim() {
        assert!(Method::Put.accepts("PUT", false));
        assert!(!Method::Put.accepts("POST", false));
    }

    #[test]
    fn action_prefix_prefers_longest_token() {
        let (method, rest) = from_action_prefix("xpostComment");
        assert_eq!(method, Method::XPost);
        assert_eq!(rest, "Comment");

        let (method, rest) = from_action_prefix("getUserProfile");
        assert_eq!(method, Method::Get);
        assert_eq!(rest, "UserProfile");

        let (method, rest) = from_action_prefix("about");
        assert_eq!(method, Method::Any);
        assert_eq!(rest, "about");
    }

    #[test]
    fn request_method_validation() {
        assert!(Method::validate_request_method("GET").is_ok());
        assert!(Method::validate_request_method("ANY").is_err());
        assert!(Method::validate_request_method("XPOST").is_err());
    }
}
