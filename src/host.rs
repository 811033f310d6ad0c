use crate::request::Request;
use crate::response::Response;

/// Resolves string references and middleware identifiers into executable
/// code.
///
/// Controller loading and middleware class resolution live outside the
/// router core; the host supplies an `Invoker` and the dispatcher calls into
/// it whenever a matched route carries a `"Controller@method"` callback or a
/// named middleware. Closure callbacks never reach the invoker.
pub trait Invoker {
    /// Invokes a `"Controller@method"` reference with the captured route
    /// parameters.
    fn invoke_handler(&self, reference: &str, request: &mut Request, params: &[String]) -> crate::Result<Response>;

    /// Runs a named before-middleware. It may mutate the request.
    fn invoke_before(&self, name: &str, request: &mut Request) -> crate::Result<()>;

    /// Runs a named after-middleware. It may mutate the response.
    fn invoke_after(&self, name: &str, request: &Request, response: &mut Response) -> crate::Result<()>;
}

/// Sends the finished response to the client.
///
/// The router core never touches sockets; [`Router::run`](crate::Router::run)
/// hands every response (matched, not-found or error) to the host through
/// this trait.
pub trait Transport {
    fn send(&mut self, response: Response) -> crate::Result<()>;
}

/// The invoker used until the host configures one: every reference and
/// middleware name is unresolvable.
#[derive(Debug, Default)]
pub(crate) struct UnresolvedInvoker;

impl Invoker for UnresolvedInvoker {
    fn invoke_handler(&self, reference: &str, _request: &mut Request, _params: &[String]) -> crate::Result<Response> {
        Err(crate::Error::UnresolvableReference(reference.to_string()))
    }

    fn invoke_before(&self, name: &str, _request: &mut Request) -> crate::Result<()> {
        Err(crate::Error::UnresolvableReference(name.to_string()))
    }

    fn invoke_after(&self, name: &str, _request: &Request, _response: &mut Response) -> crate::Result<()> {
        Err(crate::Error::UnresolvableReference(name.to_string()))
    }
}
