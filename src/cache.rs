use crate::Error;
use crate::method::Method;
use crate::middleware::Middlewares;
use crate::route::{Callback, Route};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// One route record in the persisted snapshot. Callbacks are stored as their
/// `"Controller@method"` reference; closures never make it here.
#[derive(Debug, Serialize, Deserialize)]
struct CachedRoute {
    path: String,
    method: Method,
    callback: String,
    name: Option<String>,
    before: Middlewares,
    after: Middlewares,
    group_segments: Vec<String>,
}

/// Writes the route table snapshot. Fails when any record's callback is a
/// closure, since closures can not be serialized.
pub(crate) fn save(routes: &[Route], path: &Path) -> crate::Result<()> {
    let snapshot: Vec<CachedRoute> = routes
        .iter()
        .map(|route| {
            let reference = route
                .callback
                .as_reference()
                .ok_or_else(|| Error::UncacheableRoute(route.path.clone()))?;
            Ok(CachedRoute {
                path: route.path.clone(),
                method: route.method,
                callback: reference.to_string(),
                name: route.name.clone(),
                before: route.before.clone(),
                after: route.after.clone(),
                group_segments: route.group_segments.clone(),
            })
        })
        .collect::<crate::Result<_>>()?;

    let encoded = serde_json::to_string_pretty(&snapshot)?;
    fs::write(path, encoded)?;
    debug!(path = %path.display(), routes = snapshot.len(), "route cache written");
    Ok(())
}

/// Reads a snapshot back into route records, preserving storage order.
/// Returns `None` when no snapshot file exists; a present but unreadable or
/// malformed file is an error.
pub(crate) fn load(path: &Path) -> crate::Result<Option<Vec<Route>>> {
    if !path.exists() {
        return Ok(None);
    }

    let encoded = fs::read_to_string(path)?;
    let snapshot: Vec<CachedRoute> = serde_json::from_str(&encoded)?;
    let routes = snapshot
        .into_iter()
        .map(|cached| {
            Route::new(
                cached.path,
                cached.method,
                Callback::Reference(cached.callback),
                cached.name,
                cached.before,
                cached.after,
                cached.group_segments,
            )
        })
        .collect::<Vec<_>>();

    debug!(path = %path.display(), routes = routes.len(), "route cache loaded");
    Ok(Some(routes))
}
