use http::StatusCode;
use routier::{
    Callback, GroupOptions, Invoker, Request, Response, RouteOptions, Router, RouterConfig, Transport,
};
use std::sync::{Arc, Mutex};

/// Buffers the response the router sends, the way a real transport would
/// write it to the client.
struct Buffer(Option<Response>);

impl Buffer {
    fn new() -> Buffer {
        Buffer(None)
    }

    fn sent(&self) -> &Response {
        self.0.as_ref().expect("no response was sent")
    }
}

impl Transport for Buffer {
    fn send(&mut self, response: Response) -> routier::Result<()> {
        self.0 = Some(response);
        Ok(())
    }
}

/// Records every handler and middleware invocation in order, and answers
/// reference callbacks with a canned body.
#[derive(Clone, Default)]
struct Recorder {
    log: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    fn entries(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl Invoker for Recorder {
    fn invoke_handler(&self, reference: &str, _request: &mut Request, params: &[String]) -> routier::Result<Response> {
        self.log.lock().unwrap().push(format!("handler:{}", reference));
        Ok(Response::text(format!("{}({})", reference, params.join(","))))
    }

    fn invoke_before(&self, name: &str, _request: &mut Request) -> routier::Result<()> {
        self.log.lock().unwrap().push(format!("before:{}", name));
        Ok(())
    }

    fn invoke_after(&self, name: &str, _request: &Request, response: &mut Response) -> routier::Result<()> {
        self.log.lock().unwrap().push(format!("after:{}", name));
        let body = format!("{}+{}", response.body(), name);
        response.set_body(body);
        Ok(())
    }
}

fn run(router: &Router, request: Request) -> Response {
    let mut out = Buffer::new();
    router.run(request, &mut out).unwrap();
    out.sent().clone()
}

#[test]
fn newest_registration_wins_for_the_same_path() {
    let mut router = Router::new();
    router
        .get("/page", Callback::from_fn(|_, _| Ok(Response::text("old"))), RouteOptions::default())
        .unwrap();
    router
        .get("/page", Callback::from_fn(|_, _| Ok(Response::text("new"))), RouteOptions::default())
        .unwrap();

    assert_eq!(run(&router, Request::new("GET", "/page")).body(), "new");
}

#[test]
fn later_record_is_skipped_on_method_mismatch() {
    let mut router = Router::new();
    router
        .get("/page", Callback::from_fn(|_, _| Ok(Response::text("get"))), RouteOptions::default())
        .unwrap();
    router
        .post("/page", Callback::from_fn(|_, _| Ok(Response::text("post"))), RouteOptions::default())
        .unwrap();

    // The POST record is newer but a GET request must fall through to the
    // older GET record.
    assert_eq!(run(&router, Request::new("GET", "/page")).body(), "get");
}

#[test]
fn optional_segments_expand_into_incremental_prefixes() {
    let mut router = Router::new();
    router
        .get("/a/b?/c?", Callback::from_fn(|_, _| Ok(Response::text("H"))), RouteOptions::default())
        .unwrap();

    assert_eq!(run(&router, Request::new("GET", "/a")).body(), "H");
    assert_eq!(run(&router, Request::new("GET", "/a/b")).body(), "H");
    assert_eq!(run(&router, Request::new("GET", "/a/b/c")).body(), "H");
    assert_eq!(run(&router, Request::new("GET", "/a/b/c/d")).status(), StatusCode::NOT_FOUND);
}

#[test]
fn placeholder_patterns_capture_parameters() {
    let mut router = Router::new();
    router
        .get(
            "/user/:id",
            Callback::from_fn(|_, params| Ok(Response::text(params[0].clone()))),
            RouteOptions::default(),
        )
        .unwrap();

    assert_eq!(run(&router, Request::new("GET", "/user/42")).body(), "42");
    assert_eq!(run(&router, Request::new("GET", "/user/abc")).status(), StatusCode::NOT_FOUND);
}

#[test]
fn captured_values_are_percent_decoded_and_trimmed() {
    let mut router = Router::new();
    router
        .get(
            "/tag/:any",
            Callback::from_fn(|_, params| Ok(Response::text(params[0].clone()))),
            RouteOptions::default(),
        )
        .unwrap();

    assert_eq!(run(&router, Request::new("GET", "/tag/rust%20lang")).body(), "rust lang");
}

#[test]
fn group_middleware_runs_before_route_middleware() {
    let recorder = Recorder::default();
    let mut router = Router::new();
    router.set_invoker(recorder.clone());

    router
        .group("/api", GroupOptions::default().with_before("A"), |api| {
            api.get(
                "/ping",
                Callback::reference("ApiController@ping"),
                RouteOptions::default().with_before("B"),
            )
        })
        .unwrap();

    let route = &router.list()[0];
    assert_eq!(route.path(), "/api/ping");
    assert_eq!(route.before().as_slice(), ["A", "B"]);

    run(&router, Request::new("GET", "/api/ping"));
    assert_eq!(
        recorder.entries(),
        ["before:A", "before:B", "handler:ApiController@ping"]
    );
}

#[test]
fn after_middleware_runs_after_the_handler_in_order() {
    let recorder = Recorder::default();
    let mut router = Router::new();
    router.set_invoker(recorder.clone());

    router
        .group("/api", GroupOptions::default().with_after("X"), |api| {
            api.get(
                "/ping",
                Callback::reference("ApiController@ping"),
                RouteOptions::default().with_after("Y"),
            )
        })
        .unwrap();

    let response = run(&router, Request::new("GET", "/api/ping"));
    assert_eq!(
        recorder.entries(),
        ["handler:ApiController@ping", "after:X", "after:Y"]
    );
    assert_eq!(response.body(), "ApiController@ping()+X+Y");
}

#[test]
fn group_level_placeholders_are_not_route_parameters() {
    let mut router = Router::new();
    router.pattern("lang", "[a-z]{2}").unwrap();
    router
        .group("/:lang", GroupOptions::default(), |lang| {
            lang.get(
                "/user/:id",
                Callback::from_fn(|_, params| Ok(Response::text(params.join(",")))),
                RouteOptions::default(),
            )
        })
        .unwrap();

    // The ":lang" capture belongs to the group, so the handler only sees
    // the route-local ":id" value.
    assert_eq!(run(&router, Request::new("GET", "/en/user/7")).body(), "7");
}

#[test]
fn method_override_field_changes_the_effective_method() {
    let mut router = Router::new();
    router
        .put("/thing", Callback::from_fn(|_, _| Ok(Response::text("put"))), RouteOptions::default())
        .unwrap();

    let request = Request::new("POST", "/thing").with_form_field("_method", "PUT");
    assert_eq!(run(&router, request).body(), "put");

    // Without the override the POST request matches nothing.
    assert_eq!(run(&router, Request::new("POST", "/thing")).status(), StatusCode::NOT_FOUND);
}

#[test]
fn xpost_routes_match_xhr_post_requests_only() {
    let mut router = Router::new();
    router
        .xpost("/submit", Callback::from_fn(|_, _| Ok(Response::text("xhr"))), RouteOptions::default())
        .unwrap();

    let xhr = Request::new("POST", "/submit").with_header("X-Requested-With", "XMLHttpRequest");
    assert_eq!(run(&router, xhr).body(), "xhr");

    let plain = Request::new("POST", "/submit");
    assert_eq!(run(&router, plain).status(), StatusCode::NOT_FOUND);

    let wrong_verb = Request::new("GET", "/submit").with_header("X-Requested-With", "XMLHttpRequest");
    assert_eq!(run(&router, wrong_verb).status(), StatusCode::NOT_FOUND);
}

#[test]
fn ajax_routes_match_any_xhr_method() {
    let mut router = Router::new();
    router
        .ajax("/live", Callback::from_fn(|_, _| Ok(Response::text("live"))), RouteOptions::default())
        .unwrap();

    let xhr = Request::new("DELETE", "/live").with_header("X-Requested-With", "XMLHttpRequest");
    assert_eq!(run(&router, xhr).body(), "live");
    assert_eq!(run(&router, Request::new("DELETE", "/live")).status(), StatusCode::NOT_FOUND);
}

#[test]
fn unmatched_paths_invoke_the_not_found_handler_only() {
    let recorder = Recorder::default();
    let mut router = Router::new();
    router.set_invoker(recorder.clone());
    router
        .get("/known", Callback::reference("Page@known"), RouteOptions::default())
        .unwrap();
    router.not_found(|_| Ok(Response::text("nope").with_status(StatusCode::NOT_FOUND)));

    let response = run(&router, Request::new("GET", "/unknown"));
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.body(), "nope");
    assert!(recorder.entries().is_empty());
}

#[test]
fn dispatch_errors_become_500_responses_by_default() {
    let mut router = Router::new();
    router
        .get(
            "/boom",
            Callback::from_fn(|_, _| Err(routier::Error::dispatch("handler exploded"))),
            RouteOptions::default(),
        )
        .unwrap();

    let response = run(&router, Request::new("GET", "/boom"));
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body().contains("handler exploded"));
}

#[test]
fn debug_mode_propagates_dispatch_errors() {
    let mut config = RouterConfig::default();
    config.debug = true;
    let mut router = Router::with_config(config).unwrap();
    router
        .get(
            "/boom",
            Callback::from_fn(|_, _| Err(routier::Error::dispatch("handler exploded"))),
            RouteOptions::default(),
        )
        .unwrap();

    let mut out = Buffer::new();
    let err = router.run(Request::new("GET", "/boom"), &mut out).unwrap_err();
    assert!(err.to_string().contains("handler exploded"));
    assert!(out.0.is_none());
}

#[test]
fn custom_error_handler_receives_the_original_error() {
    let mut router = Router::new();
    router
        .get(
            "/boom",
            Callback::from_fn(|_, _| Err(routier::Error::dispatch("original"))),
            RouteOptions::default(),
        )
        .unwrap();
    router.error(|_, err| Response::text(format!("handled: {}", err)).with_status(StatusCode::INTERNAL_SERVER_ERROR));

    let response = run(&router, Request::new("GET", "/boom"));
    assert_eq!(response.body(), "handled: dispatch error: original");
}

#[test]
fn head_responses_have_their_body_discarded() {
    let mut router = Router::new();
    router
        .head(
            "/doc",
            Callback::from_fn(|_, _| Ok(Response::text("payload").with_header("x-len", "7"))),
            RouteOptions::default(),
        )
        .unwrap();

    let response = run(&router, Request::new("HEAD", "/doc"));
    assert_eq!(response.body(), "");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers(), &[("x-len".to_string(), "7".to_string())]);
}

#[test]
fn redefining_a_built_in_pattern_fails_and_leaves_it_intact() {
    let mut router = Router::new();
    assert!(router.pattern(":id", "[a-z]+").is_err());

    router
        .get(
            "/user/:id",
            Callback::from_fn(|_, params| Ok(Response::text(params[0].clone()))),
            RouteOptions::default(),
        )
        .unwrap();

    // ":id" still only matches digits.
    assert_eq!(run(&router, Request::new("GET", "/user/42")).body(), "42");
    assert_eq!(run(&router, Request::new("GET", "/user/abc")).status(), StatusCode::NOT_FOUND);
}

#[test]
fn cache_round_trip_restores_an_identical_table() {
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("routes.json");

    let mut config = RouterConfig::default();
    config.cache = Some(cache_path.clone());

    let mut router = Router::with_config(config.clone()).unwrap();
    router
        .group("/api", GroupOptions::default().with_before("auth"), |api| {
            api.get("/users/:id", Callback::reference("UserController@show"), RouteOptions::default())?;
            api.post("/users", Callback::reference("UserController@create"), RouteOptions::default())
        })
        .unwrap();
    router.cache().unwrap();

    let restored = Router::with_config(config).unwrap();
    let before = router.list();
    let after = restored.list();
    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(after.iter()) {
        assert_eq!(a.path(), b.path());
        assert_eq!(a.method(), b.method());
        assert_eq!(a.name(), b.name());
        assert_eq!(a.callback_reference(), b.callback_reference());
        assert_eq!(a.before(), b.before());
        assert_eq!(a.after(), b.after());
        assert_eq!(a.group_segments(), b.group_segments());
    }
}

#[test]
fn registration_is_a_no_op_after_cache_load() {
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("routes.json");

    let mut config = RouterConfig::default();
    config.cache = Some(cache_path.clone());

    let mut router = Router::with_config(config.clone()).unwrap();
    router
        .get("/cached", Callback::reference("Page@cached"), RouteOptions::default())
        .unwrap();
    router.cache().unwrap();

    let mut restored = Router::with_config(config).unwrap();
    restored
        .get("/late", Callback::reference("Page@late"), RouteOptions::default())
        .unwrap();

    let paths: Vec<String> = restored.list().iter().map(|r| r.path().to_string()).collect();
    assert_eq!(paths, ["/cached"]);
}

#[test]
fn caching_a_closure_route_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = RouterConfig::default();
    config.cache = Some(dir.path().join("routes.json"));

    let mut router = Router::with_config(config).unwrap();
    router
        .get("/inline", Callback::from_fn(|_, _| Ok(Response::empty())), RouteOptions::default())
        .unwrap();

    assert!(matches!(router.cache(), Err(routier::Error::UncacheableRoute(_))));
}

#[test]
fn base_folder_is_stripped_from_the_request_path() {
    let mut config = RouterConfig::default();
    config.base_folder = "myapp".to_string();
    let mut router = Router::with_config(config).unwrap();
    router
        .get("/home", Callback::from_fn(|_, _| Ok(Response::text("home"))), RouteOptions::default())
        .unwrap();

    assert_eq!(run(&router, Request::new("GET", "/myapp/home?tab=1")).body(), "home");
}

#[test]
fn reference_callbacks_reach_the_invoker_with_parameters() {
    let recorder = Recorder::default();
    let mut router = Router::new();
    router.set_invoker(recorder.clone());
    router
        .get("/user/:id/:slug", Callback::reference("UserController@show"), RouteOptions::default())
        .unwrap();

    let response = run(&router, Request::new("GET", "/user/42/hello-world"));
    assert_eq!(response.body(), "UserController@show(42,hello-world)");
}
