use std::sync::Arc;

use axum::extract::{Form, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::error;

use n2k_resolver::Resolver;

/// Query/form parameters of the single resolver route.
///
/// Empty strings are treated the same as absent parameters, matching what
/// scripted in-world callers send.
#[derive(Debug, Default, Deserialize)]
pub struct ResolveParams {
    pub name: Option<String>,
    pub key: Option<String>,
    /// Compatibility mode: respond with the bare value. Anything except an
    /// explicit `"false"` (including absent and empty) enables it.
    pub compat: Option<String>,
}

/// GET side of the resolver route.
pub async fn resolve_get(
    State(resolver): State<Arc<Resolver>>,
    headers: HeaderMap,
    Query(params): Query<ResolveParams>,
) -> Response {
    resolve(resolver, headers, params).await
}

/// POST side of the resolver route (urlencoded form body).
pub async fn resolve_post(
    State(resolver): State<Arc<Resolver>>,
    headers: HeaderMap,
    Form(params): Form<ResolveParams>,
) -> Response {
    resolve(resolver, headers, params).await
}

/// Route the three request shapes: both parameters insert, one parameter
/// looks up in that direction, neither is an error.
async fn resolve(resolver: Arc<Resolver>, headers: HeaderMap, params: ResolveParams) -> Response {
    let name = params.name.filter(|s| !s.is_empty());
    let key = params.key.filter(|s| !s.is_empty());
    let compat = params.compat.as_deref() != Some("false");

    match (name, key) {
        (Some(name), Some(key)) => {
            // New entry; the caller's grid rides the shard header.
            let grid = headers
                .get("x-secondlife-shard")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let outcome = {
                let resolver = Arc::clone(&resolver);
                let (name, key, grid) = (name.clone(), key.clone(), grid.clone());
                tokio::task::spawn_blocking(move || resolver.insert(&name, &key, &grid)).await
            };
            match outcome {
                Ok(Ok(())) => (
                    StatusCode::OK,
                    format!("Added new entry for '{name}' which is: {key} from grid: '{grid}'"),
                )
                    .into_response(),
                Ok(Err(e)) => {
                    error!(name, key, error = %e, "insert failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, "insert failed").into_response()
                }
                Err(e) => {
                    error!(error = %e, "insert task panicked");
                    (StatusCode::INTERNAL_SERVER_ERROR, "insert failed").into_response()
                }
            }
        }
        (Some(name), None) => {
            let looked_up = {
                let resolver = Arc::clone(&resolver);
                let name = name.clone();
                tokio::task::spawn_blocking(move || resolver.lookup_by_name(&name)).await
            };
            match looked_up {
                Ok((key, grid)) => {
                    let body = if compat {
                        key
                    } else {
                        format!("UUID for '{name}' is: {key} from grid: '{grid}'")
                    };
                    (StatusCode::OK, body).into_response()
                }
                Err(e) => {
                    error!(error = %e, "lookup task panicked");
                    (StatusCode::INTERNAL_SERVER_ERROR, String::new()).into_response()
                }
            }
        }
        (None, Some(key)) => {
            let looked_up = {
                let resolver = Arc::clone(&resolver);
                let key = key.clone();
                tokio::task::spawn_blocking(move || resolver.lookup_by_key(&key)).await
            };
            match looked_up {
                Ok((name, grid)) => {
                    let body = if compat {
                        name
                    } else {
                        format!("avatar name for '{key}' is '{name}' on grid: '{grid}'")
                    };
                    (StatusCode::OK, body).into_response()
                }
                Err(e) => {
                    error!(error = %e, "lookup task panicked");
                    (StatusCode::INTERNAL_SERVER_ERROR, String::new()).into_response()
                }
            }
        }
        (None, None) => (
            StatusCode::NOT_FOUND,
            "empty avatar name and key received, cannot proceed",
        )
            .into_response(),
    }
}
