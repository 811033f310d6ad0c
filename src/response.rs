use http::StatusCode;

/// A fully buffered response produced by a handler or terminal handler.
///
/// The router never streams: the body is held in memory until the host's
/// [`Transport`](crate::Transport) sends it, which lets `HEAD` dispatch
/// discard the buffered body while keeping status and headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: String,
}

impl Response {
    /// A `200 OK` response with the given body.
    pub fn text<B: Into<String>>(body: B) -> Response {
        Response {
            status: StatusCode::OK,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// An empty `200 OK` response.
    pub fn empty() -> Response {
        Response::text("")
    }

    /// Replaces the status code.
    pub fn with_status(mut self, status: StatusCode) -> Response {
        self.status = status;
        self
    }

    /// Appends a header.
    pub fn with_header<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Response {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_body<B: Into<String>>(&mut self, body: B) {
        self.body = body.into();
    }

    /// Drops any buffered body content, leaving status and headers as they
    /// are. Used for `HEAD` dispatch.
    pub(crate) fn discard_body(&mut self) {
        self.body.clear();
    }
}
