/// Every method token accepted at route declaration time, longest first so
/// that prefix scans (e.g. controller action names) prefer `XPOST` over a
/// shorter token.
pub(crate) const SUPPORTED_METHODS: [&str; 14] = [
    "XDELETE", "OPTIONS", "XPATCH", "DELETE", "XPOST", "PATCH", "XGET", "XPUT", "AJAX", "HEAD", "POST", "ANY", "GET",
    "PUT",
];

/// Plain HTTP verbs which are legal as an effective request method.
pub(crate) const REQUEST_METHODS: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "HEAD", "OPTIONS", "PATCH"];

/// Built-in placeholder patterns. These names can not be redefined.
pub(crate) const BUILT_IN_PATTERNS: [(&str, &str); 8] = [
    (":id", r"(\d+)"),
    (":number", r"(\d+)"),
    (":any", r"([^/]+)"),
    (":all", r"(.*)"),
    (":string", r"(\w+)"),
    (":slug", r"([\w\-_]+)"),
    (
        ":uuid",
        r"([0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12})",
    ),
    (":date", r"([0-9]{4}-[0-9]{2}-[0-9]{2})"),
];

/// The form field which overrides the declared HTTP method.
pub(crate) const METHOD_OVERRIDE_FIELD: &str = "_method";

/// Header marking a request as an XHR call.
pub(crate) const XHR_HEADER: &str = "x-requested-with";
pub(crate) const XHR_HEADER_VALUE: &str = "XMLHttpRequest";

/// Body of the default not-found response.
pub(crate) const DEFAULT_NOT_FOUND_TEXT: &str =
    "Looks like page not found or something went wrong. Please try again.";
