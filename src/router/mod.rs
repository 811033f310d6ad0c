use crate::cache;
use crate::config::RouterConfig;
use crate::constants::DEFAULT_NOT_FOUND_TEXT;
use crate::controller::{ControllerOptions, ControllerSource, camel_to_hyphen};
use crate::helpers;
use crate::host::{Invoker, Transport, UnresolvedInvoker};
use crate::method::{Method, from_action_prefix};
use crate::middleware::Middlewares;
use crate::patterns::PatternRegistry;
use crate::request::Request;
use crate::response::Response;
use crate::route::{Callback, Route, expand_optional_segments};
use crate::{Error, Result};
use http::StatusCode;
use std::collections::VecDeque;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;
use tracing::{debug, error, trace};

type NotFoundHandler = Arc<dyn Fn(&mut Request) -> Result<Response> + Send + Sync + 'static>;
type ErrorHandler = Arc<dyn Fn(&mut Request, &Error) -> Response + Send + Sync + 'static>;

/// Per-route registration options: an explicit name plus before/after
/// middleware identifiers.
#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
    pub name: Option<String>,
    pub before: Middlewares,
    pub after: Middlewares,
}

impl RouteOptions {
    pub fn named<N: Into<String>>(name: N) -> RouteOptions {
        RouteOptions {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_before<M: Into<Middlewares>>(mut self, middlewares: M) -> RouteOptions {
        self.before = middlewares.into();
        self
    }

    pub fn with_after<M: Into<Middlewares>>(mut self, middlewares: M) -> RouteOptions {
        self.after = middlewares.into();
        self
    }
}

/// Group registration options: middleware inherited by every route the group
/// body registers.
#[derive(Debug, Clone, Default)]
pub struct GroupOptions {
    pub before: Middlewares,
    pub after: Middlewares,
}

impl GroupOptions {
    pub fn with_before<M: Into<Middlewares>>(mut self, middlewares: M) -> GroupOptions {
        self.before = middlewares.into();
        self
    }

    pub fn with_after<M: Into<Middlewares>>(mut self, middlewares: M) -> GroupOptions {
        self.after = middlewares.into();
        self
    }
}

/// A transient frame on the group stack, alive while a group body runs.
#[derive(Debug, Clone)]
struct GroupFrame {
    prefix: String,
    before: Middlewares,
    after: Middlewares,
}

/// The router: a pattern registry, an ordered route table and the
/// match-and-dispatch engine.
///
/// Routes are registered during a startup phase (or bulk-loaded from a
/// cache snapshot, which turns further registration into no-ops); each
/// inbound request then goes through one [`run`](Router::run) call which
/// matches, runs the before/handler/after chain and sends the response
/// through the host [`Transport`].
///
/// # Examples
///
/// ```
/// use routier::{Callback, Request, Response, Result, RouteOptions, Router, Transport};
///
/// struct Buffer(Option<Response>);
///
/// impl Transport for Buffer {
///     fn send(&mut self, response: Response) -> Result<()> {
///         self.0 = Some(response);
///         Ok(())
///     }
/// }
///
/// let mut router = Router::new();
/// router
///     .get(
///         "/users/:id",
///         Callback::from_fn(|_req, params| Ok(Response::text(format!("user {}", params[0])))),
///         RouteOptions::default(),
///     )
///     .unwrap();
///
/// let mut out = Buffer(None);
/// router.run(Request::new("GET", "/users/42"), &mut out).unwrap();
/// assert_eq!(out.0.unwrap().body(), "user 42");
/// ```
pub struct Router {
    config: RouterConfig,
    patterns: PatternRegistry,
    routes: VecDeque<Route>,
    groups: Vec<GroupFrame>,
    cache_loaded: bool,
    invoker: Box<dyn Invoker + Send + Sync>,
    not_found: NotFoundHandler,
    error_handler: ErrorHandler,
}

impl Router {
    /// A router with default configuration and no cache.
    pub fn new() -> Router {
        Router {
            config: RouterConfig::default(),
            patterns: PatternRegistry::new(),
            routes: VecDeque::new(),
            groups: Vec::new(),
            cache_loaded: false,
            invoker: Box::new(UnresolvedInvoker),
            not_found: Arc::new(default_not_found),
            error_handler: Arc::new(default_error_handler),
        }
    }

    /// A router with the given configuration. When a cache path is
    /// configured and a snapshot exists there, the table is loaded from it
    /// and registration calls become no-ops for this process lifetime.
    pub fn with_config(config: RouterConfig) -> Result<Router> {
        let mut router = Router::new();
        router.config = config;
        if router.config.cache.is_some() {
            router.load_cache()?;
        }
        Ok(router)
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Installs the host collaborator which resolves string callbacks and
    /// middleware identifiers into executable code.
    pub fn set_invoker<I: Invoker + Send + Sync + 'static>(&mut self, invoker: I) {
        self.invoker = Box::new(invoker);
    }

    /// Defines a custom placeholder pattern. Redefining a built-in name is a
    /// configuration error.
    pub fn pattern(&mut self, name: &str, fragment: &str) -> Result<()> {
        self.patterns.define(name, fragment)
    }

    /// Defines several custom patterns at once.
    pub fn patterns<'a, I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, fragment) in entries {
            self.patterns.define(name, fragment)?;
        }
        Ok(())
    }

    /// Overrides the not-found handler (default: 404 with a fixed message).
    pub fn not_found<F>(&mut self, handler: F)
    where
        F: Fn(&mut Request) -> Result<Response> + Send + Sync + 'static,
    {
        self.not_found = Arc::new(handler);
    }

    /// Overrides the error handler (default: the error's status code with
    /// its display text as the body).
    pub fn error<F>(&mut self, handler: F)
    where
        F: Fn(&mut Request, &Error) -> Response + Send + Sync + 'static,
    {
        self.error_handler = Arc::new(handler);
    }

    /// Registers a route for one or more pipe-delimited method tokens (e.g.
    /// `"GET|POST"`). Tokens outside the supported vocabulary fail with a
    /// configuration error. A no-op after a cache snapshot was loaded.
    pub fn add<C: Into<Callback>>(&mut self, methods: &str, path: &str, callback: C, options: RouteOptions) -> Result<()> {
        if self.cache_loaded {
            return Ok(());
        }
        let methods = Method::parse_spec(methods)?;
        self.register(&methods, path, callback.into(), options)
    }

    /// Opens a group: every route registered by `body` gets the prefix and
    /// the group middleware. Groups nest; prefixes and middleware
    /// concatenate outer-to-inner. The frame is popped even when `body`
    /// returns an error.
    pub fn group<F>(&mut self, prefix: &str, options: GroupOptions, body: F) -> Result<()>
    where
        F: FnOnce(&mut Router) -> Result<()>,
    {
        self.groups.push(GroupFrame {
            prefix: helpers::normalize_path(prefix),
            before: options.before,
            after: options.after,
        });
        let outcome = body(self);
        self.groups.pop();
        outcome
    }

    /// Registers routes for every public action of a controller. The HTTP
    /// method comes from a case-insensitive prefix of the action name
    /// (`ANY` when none matches), the URL segment from the camel-case
    /// remainder, and a placeholder per formal parameter from its declared
    /// type (optional parameters get optional segments). The configured
    /// `main_method` action maps to the bare prefix.
    pub fn controller<S: ControllerSource + ?Sized>(
        &mut self,
        prefix: &str,
        source: &S,
        options: ControllerOptions,
    ) -> Result<()> {
        if self.cache_loaded {
            return Ok(());
        }

        for action in source.actions() {
            if !options.allows(&action.name) {
                continue;
            }

            let (method, remainder) = from_action_prefix(&action.name);
            let segment = if action.name == self.config.main_method {
                String::new()
            } else {
                camel_to_hyphen(&remainder)
            };

            let mut path = format!("{}/{}", prefix, segment);
            for param in &action.params {
                path.push('/');
                path.push_str(param.kind.placeholder());
                if param.optional {
                    path.push('?');
                }
            }

            let callback = Callback::reference(format!("{}@{}", source.name(), action.name));
            let route_options = RouteOptions::default()
                .with_before(options.before.clone())
                .with_after(options.after.clone());
            self.register(&[method], &path, callback, route_options)?;
        }
        Ok(())
    }

    /// A snapshot of all records in storage order (newest registrations
    /// first).
    pub fn list(&self) -> Vec<Route> {
        self.routes.iter().cloned().collect()
    }

    /// Persists the route table to the configured cache path. Fails when any
    /// record's callback is a closure.
    pub fn cache(&self) -> Result<()> {
        let path = self.config.cache.as_ref().ok_or(Error::MissingCachePath)?;
        let routes = self.list();
        cache::save(&routes, path)
    }

    /// Loads the route table from the configured cache path, replacing any
    /// registered routes and freezing the table. Returns whether a snapshot
    /// was loaded.
    pub fn load_cache(&mut self) -> Result<bool> {
        let path = self.config.cache.as_ref().ok_or(Error::MissingCachePath)?;
        match cache::load(path)? {
            Some(routes) => {
                self.routes = routes.into_iter().collect();
                self.cache_loaded = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Handles one request to completion: match, middleware, handler, then
    /// send through the transport. Unmatched paths go to the not-found
    /// handler. Dispatch errors are re-raised when `debug` is set, otherwise
    /// the error handler's response is sent. A `HEAD` request's response
    /// body is discarded before sending.
    pub fn run<T: Transport>(&self, mut request: Request, transport: &mut T) -> Result<()> {
        match self.dispatch(&mut request) {
            Ok(mut response) => {
                if request.resolve_method().ok().as_deref() == Some("HEAD") {
                    response.discard_body();
                }
                transport.send(response)
            }
            Err(err) => {
                if self.config.debug {
                    return Err(err);
                }
                error!(error = %err, "dispatch failed");
                let response = (self.error_handler)(&mut request, &err);
                transport.send(response)
            }
        }
    }

    fn register(&mut self, methods: &[Method], path: &str, callback: Callback, options: RouteOptions) -> Result<()> {
        if self.cache_loaded {
            return Ok(());
        }

        let group_segments: Vec<String> = self.groups.iter().map(|frame| frame.prefix.clone()).collect();
        let prefixed = {
            let mut acc = String::new();
            for segment in &group_segments {
                acc = helpers::join_paths(&acc, segment);
            }
            helpers::join_paths(&acc, path)
        };

        let before_lists: Vec<Middlewares> = self.groups.iter().map(|frame| frame.before.clone()).collect();
        let after_lists: Vec<Middlewares> = self.groups.iter().map(|frame| frame.after.clone()).collect();
        let before = Middlewares::chain(&before_lists, &options.before);
        let after = Middlewares::chain(&after_lists, &options.after);

        for expanded in expand_optional_segments(&prefixed) {
            for method in methods {
                debug!(method = %method, path = %expanded, "route registered");
                self.routes.push_front(Route::new(
                    expanded.clone(),
                    *method,
                    callback.clone(),
                    options.name.clone(),
                    before.clone(),
                    after.clone(),
                    group_segments.clone(),
                ));
            }
        }
        Ok(())
    }

    /// The single-pass match loop: newest records first, method check, then
    /// exact or pattern match, first match wins.
    fn dispatch(&self, request: &mut Request) -> Result<Response> {
        let method = request.resolve_method()?;
        let path = request.resolve_path(&self.config.base_folder);
        let xhr = request.is_xhr();

        for route in &self.routes {
            if !route.method.accepts(&method, xhr) {
                continue;
            }

            let captured = if route.has_placeholder() {
                let regex = self.patterns.compile(&route.path)?;
                regex.captures(&path).map(|caps| {
                    caps.iter()
                        .skip(1)
                        .filter_map(|group| group.map(|g| g.as_str().to_string()))
                        .collect::<Vec<_>>()
                })
            } else if route.path == path {
                Some(Vec::new())
            } else {
                None
            };

            if let Some(mut params) = captured {
                // Leading captures produced by group-level placeholders are
                // not route parameters.
                let group_captures = route.group_capture_count().min(params.len());
                params.drain(..group_captures);
                let params: Vec<String> = params
                    .iter()
                    .map(|value| helpers::percent_decode_path_value(value).trim().to_string())
                    .collect();

                trace!(method = %method, path = %path, route = %route.path, "route matched");
                return self.invoke(route, request, &params);
            }
        }

        trace!(method = %method, path = %path, "no route matched");
        (self.not_found)(request)
    }

    fn invoke(&self, route: &Route, request: &mut Request, params: &[String]) -> Result<Response> {
        for name in route.before.as_slice() {
            self.invoker.invoke_before(name, request)?;
        }

        let mut response = match &route.callback {
            Callback::Closure(handler) => handler(request, params)?,
            Callback::Reference(reference) => self.invoker.invoke_handler(reference, request, params)?,
        };

        for name in route.after.as_slice() {
            self.invoker.invoke_after(name, request, &mut response)?;
        }
        Ok(response)
    }
}

macro_rules! verb_shorthand {
    ($($(#[$doc:meta])* $fn_name:ident => $method:expr;)*) => {
        impl Router {
            $(
                $(#[$doc])*
                pub fn $fn_name<C: Into<Callback>>(
                    &mut self,
                    path: &str,
                    callback: C,
                    options: RouteOptions,
                ) -> Result<()> {
                    self.register(&[$method], path, callback.into(), options)
                }
            )*
        }
    };
}

verb_shorthand! {
    /// Registers a `GET` route.
    get => Method::Get;
    /// Registers a `POST` route.
    post => Method::Post;
    /// Registers a `PUT` route.
    put => Method::Put;
    /// Registers a `DELETE` route.
    delete => Method::Delete;
    /// Registers a `HEAD` route.
    head => Method::Head;
    /// Registers an `OPTIONS` route.
    options => Method::Options;
    /// Registers a `PATCH` route.
    patch => Method::Patch;
    /// Registers a route matching every request method.
    any => Method::Any;
    /// Registers a route matching any XHR request.
    ajax => Method::Ajax;
    /// Registers a route matching XHR `GET` requests only.
    xget => Method::XGet;
    /// Registers a route matching XHR `POST` requests only.
    xpost => Method::XPost;
    /// Registers a route matching XHR `PUT` requests only.
    xput => Method::XPut;
    /// Registers a route matching XHR `DELETE` requests only.
    xdelete => Method::XDelete;
    /// Registers a route matching XHR `PATCH` requests only.
    xpatch => Method::XPatch;
}

impl Default for Router {
    fn default() -> Self {
        Router::new()
    }
}

impl Debug for Router {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ routes: {:?}, cache_loaded: {:?}, debug: {:?} }}",
            self.routes, self.cache_loaded, self.config.debug
        )
    }
}

fn default_not_found(_request: &mut Request) -> Result<Response> {
    Ok(Response::text(DEFAULT_NOT_FOUND_TEXT).with_status(StatusCode::NOT_FOUND))
}

fn default_error_handler(_request: &mut Request, err: &Error) -> Response {
    Response::text(err.to_string()).with_status(err.status_code())
}
