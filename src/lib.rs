//! `routier` is a lightweight, synchronous HTTP request router: it maps
//! method+path pairs to application callbacks, with grouped route prefixes,
//! named URL patterns, before/after middleware chains and an optional
//! file-backed route cache.
//!
//! Core features:
//!
//! - Route matching through named placeholder patterns (`/users/:id`)
//!   backed by [`regex`](https://docs.rs/regex), extensible with custom
//!   patterns
//! - Grouped prefixes with inherited middleware, nested arbitrarily
//! - Method-override (`_method` form field) and AJAX-only route tokens
//!   (`AJAX`, `XGET`, `XPOST`, ...)
//! - Controller-style registration from explicit action descriptors
//! - A route cache snapshot which skips registration on subsequent boots
//!
//! The router core stays transport-free: the host hands in an already
//! parsed [`Request`] and receives the buffered [`Response`] through its
//! [`Transport`] implementation. Resolving `"Controller@method"` strings and
//! middleware names into executable code is likewise the host's job, through
//! its [`Invoker`] implementation.
//!
//! ## Basic example
//!
//! ```
//! use routier::{Callback, Request, Response, Result, RouteOptions, Router, Transport};
//!
//! // The host's response transport; a real one writes to the client socket.
//! struct Buffer(Option<Response>);
//!
//! impl Transport for Buffer {
//!     fn send(&mut self, response: Response) -> Result<()> {
//!         self.0 = Some(response);
//!         Ok(())
//!     }
//! }
//!
//! let mut router = Router::new();
//!
//! router.get(
//!     "/",
//!     Callback::from_fn(|_req, _params| Ok(Response::text("Home page"))),
//!     RouteOptions::default(),
//! )?;
//!
//! router.get(
//!     "/users/:id",
//!     Callback::from_fn(|_req, params| Ok(Response::text(format!("User {}", params[0])))),
//!     RouteOptions::default(),
//! )?;
//!
//! let mut out = Buffer(None);
//! router.run(Request::new("GET", "/users/42"), &mut out)?;
//! assert_eq!(out.0.unwrap().body(), "User 42");
//! # Ok::<(), routier::Error>(())
//! ```
//!
//! ## Route paths and patterns
//!
//! A `:name` token in a route path is substituted with a regex fragment at
//! match time. The built-in vocabulary covers `:id`, `:number`, `:any`,
//! `:all`, `:string`, `:slug`, `:uuid` and `:date`; custom patterns can be
//! added (built-in names are reserved):
//!
//! ```
//! use routier::{Callback, RouteOptions, Router};
//!
//! let mut router = Router::new();
//! router.pattern("code", "[A-Z]{3}")?;
//! router.get("/c/:code", Callback::reference("CodeController@show"), RouteOptions::default())?;
//!
//! assert!(router.pattern(":id", "[a-z]+").is_err());
//! # Ok::<(), routier::Error>(())
//! ```
//!
//! A segment with a trailing `?` is optional: `/post/:id?` registers both
//! `/post` and `/post/:id` against the same callback.
//!
//! ## Groups and middleware
//!
//! Groups prefix every route registered inside their body and contribute
//! middleware identifiers to the routes' before/after chains, outermost
//! group first:
//!
//! ```
//! use routier::{Callback, GroupOptions, RouteOptions, Router};
//!
//! let mut router = Router::new();
//! router.group("/api", GroupOptions::default().with_before("auth"), |api| {
//!     api.get(
//!         "/ping",
//!         Callback::reference("ApiController@ping"),
//!         RouteOptions::default().with_before("throttle"),
//!     )
//! })?;
//!
//! let route = &router.list()[0];
//! assert_eq!(route.path(), "/api/ping");
//! assert_eq!(route.before().as_slice(), ["auth", "throttle"]);
//! # Ok::<(), routier::Error>(())
//! ```
//!
//! Middleware are referenced by name only; the host's [`Invoker`] runs them.
//!
//! ## Controllers
//!
//! Controller-based registration synthesizes one route per public action
//! from an explicit descriptor (no runtime reflection): the HTTP method
//! comes from the action-name prefix, the URL segment from the camel-case
//! remainder, and placeholders from the parameter types:
//!
//! ```
//! use routier::{ActionDescriptor, ControllerDescriptor, ControllerOptions, ParamKind, Router};
//!
//! let users = ControllerDescriptor::new("UserController")
//!     .with_action(ActionDescriptor::new("main"))
//!     .with_action(ActionDescriptor::new("getProfile").with_param(ParamKind::Int, false));
//!
//! let mut router = Router::new();
//! router.controller("/users", &users, ControllerOptions::default())?;
//!
//! let paths: Vec<String> = router.list().iter().map(|r| r.path().to_string()).collect();
//! assert!(paths.contains(&"/users".to_string()));
//! assert!(paths.contains(&"/users/profile/:id".to_string()));
//! # Ok::<(), routier::Error>(())
//! ```
//!
//! ## Route cache
//!
//! When every callback is a `"Controller@method"` reference, the table can
//! be written to a snapshot file and loaded on the next boot, turning all
//! registration calls into no-ops:
//!
//! ```no_run
//! use routier::{Router, RouterConfig};
//!
//! let mut config = RouterConfig::default();
//! config.cache = Some("routes.json".into());
//!
//! let router = Router::with_config(config)?;
//! router.cache()?;
//! # Ok::<(), routier::Error>(())
//! ```
//!
//! ## Error handling
//!
//! Registration-time problems (invalid method tokens, reserved pattern
//! names, bad pattern fragments) fail fast with an [`Error`]. Dispatch-time
//! failures are caught by [`Router::run`]: with `debug` enabled they
//! propagate to the host, otherwise the configured error handler builds the
//! response (500 by default). Unmatched paths are not errors; they go to the
//! not-found handler (404 by default).

pub use self::config::{Namespaces, Paths, RouterConfig};
pub use self::controller::{ActionDescriptor, ActionParam, ControllerDescriptor, ControllerOptions, ControllerSource, ParamKind};
pub use self::error::Error;
pub use self::host::{Invoker, Transport};
pub use self::method::Method;
pub use self::middleware::Middlewares;
pub use self::patterns::PatternRegistry;
pub use self::request::Request;
pub use self::response::Response;
pub use self::route::{Callback, HandlerFn, Route};
pub use self::router::{GroupOptions, RouteOptions, Router};

mod cache;
mod config;
mod constants;
mod controller;
mod error;
mod helpers;
mod host;
mod method;
mod middleware;
mod patterns;
mod request;
mod response;
mod route;
mod router;

/// A Result type often returned from methods that can have router errors.
pub type Result<T> = std::result::Result<T, Error>;
