//! JSON preview server

use anyhow::Result;
use axum::{
    extract::{OriginalUri, Path, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::{ContentStore, MarkdownRenderer};
use crate::error::ContentError;
use crate::views::{
    BlogDetailView, BlogListView, BlogQuery, ProjectDetailView, ProjectListView, SiteContext,
    WithSite,
};
use crate::Folio;

/// Shared, read-only server state
struct ServerState {
    config: SiteConfig,
    store: ContentStore,
    renderer: MarkdownRenderer,
}

type AppState = Arc<ServerState>;

/// Load content and serve it until interrupted
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    let store = folio.load_store()?;
    let app = router(folio, store);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router over an already loaded store
pub fn router(folio: &Folio, store: ContentStore) -> Router {
    let state = Arc::new(ServerState {
        config: folio.config.clone(),
        store,
        renderer: folio.renderer(),
    });

    Router::new()
        .route("/blog", get(blog_list))
        .route("/blog/:slug", get(blog_detail))
        .route("/projects", get(project_list))
        .route("/projects/:id", get(project_detail))
        .route("/site", get(site))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Content errors turned into JSON responses
struct ApiError(ContentError);

impl From<ContentError> for ApiError {
    fn from(e: ContentError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError(e) = self;
        let status = if e.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            tracing::error!("Request failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "error": e.to_string() }))).into_response()
    }
}

async fn blog_list(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Json<WithSite<BlogListView>> {
    let query = BlogQuery::from_query_string(uri.query().unwrap_or(""));
    let view = BlogListView::build(&state.store, &state.config, &query);
    Json(WithSite::new(site_context(&state, &uri, &headers), view))
}

async fn blog_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Result<Json<WithSite<BlogDetailView>>, ApiError> {
    let view = BlogDetailView::build(&state.store, &state.renderer, &state.config, &slug)?;
    Ok(Json(WithSite::new(site_context(&state, &uri, &headers), view)))
}

async fn project_list(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Json<WithSite<ProjectListView>> {
    let view = ProjectListView::build(&state.store, &state.config);
    Json(WithSite::new(site_context(&state, &uri, &headers), view))
}

async fn project_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Result<Json<WithSite<ProjectDetailView>>, ApiError> {
    // Non-numeric ids name no project
    let id = id
        .parse::<u64>()
        .map_err(|_| ContentError::not_found("project", id.clone()))?;
    let view = ProjectDetailView::build(&state.store, &state.renderer, &state.config, id)?;
    Ok(Json(WithSite::new(site_context(&state, &uri, &headers), view)))
}

#[derive(Serialize)]
struct SiteView {
    site: SiteContext,
}

async fn site(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Json<SiteView> {
    Json(SiteView {
        site: site_context(&state, &uri, &headers),
    })
}

async fn fallback(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError(ContentError::not_found("route", uri.path()))
}

fn site_context(state: &ServerState, uri: &Uri, headers: &HeaderMap) -> SiteContext {
    SiteContext::new(&state.config, uri.path(), &absolute_uri(uri, headers))
}

/// Scheme, host, path and query of the incoming request
fn absolute_uri(uri: &Uri, headers: &HeaderMap) -> String {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    let host = uri
        .authority()
        .map(|a| a.as_str().to_string())
        .or_else(|| {
            headers
                .get(header::HOST)
                .and_then(|h| h.to_str().ok())
                .map(str::to_string)
        });
    match host {
        Some(host) => {
            let scheme = uri.scheme_str().unwrap_or("http");
            format!("{}://{}{}", scheme, host, path_and_query)
        }
        None => path_and_query.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_absolute_uri_from_host_header() {
        let uri: Uri = "/blog?page=2&tag=rust".parse().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:4000"));
        assert_eq!(
            absolute_uri(&uri, &headers),
            "http://localhost:4000/blog?page=2&tag=rust"
        );
    }

    #[test]
    fn test_absolute_uri_without_host() {
        let uri: Uri = "/site".parse().unwrap();
        assert_eq!(absolute_uri(&uri, &HeaderMap::new()), "/site");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ApiError::from(ContentError::not_found("post", "missing")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_other_errors_map_to_500() {
        let io = std::io::Error::other("disk");
        let response = ApiError::from(ContentError::from(io)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
