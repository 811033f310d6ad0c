use percent_encoding::percent_decode_str;

/// Percent-decodes a captured path value, falling back to the raw text when
/// the encoding is not valid UTF-8.
pub(crate) fn percent_decode_path_value(value: &str) -> String {
    percent_decode_str(value)
        .decode_utf8()
        .map(|v| v.to_string())
        .unwrap_or_else(|_| value.to_string())
}

/// Normalizes a URI path: collapse repeated slashes, strip the trailing
/// slash, make sure there is exactly one leading slash. An empty path
/// becomes `/`.
pub(crate) fn normalize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    let mut prev_slash = false;

    for ch in path.chars() {
        if ch == '/' {
            if !prev_slash {
                out.push('/');
            }
            prev_slash = true;
        } else {
            out.push(ch);
            prev_slash = false;
        }
    }

    while out.len() > 1 && out.ends_with('/') {
        out.pop();
    }

    if !out.starts_with('/') {
        out.insert(0, '/');
    }

    out
}

/// Joins a group prefix and a route path into one normalized template.
pub(crate) fn join_paths(prefix: &str, path: &str) -> String {
    let mut joined = String::with_capacity(prefix.len() + path.len() + 2);
    joined.push('/');
    joined.push_str(prefix);
    joined.push('/');
    joined.push_str(path);
    normalize_path(&joined)
}
