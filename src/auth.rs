//! HTTP integration: request context extraction for cohort GraphQL handlers
//!
//! Provides helpers for:
//! - Building the adapter's request context from HTTP headers
//! - Extracting bearer tokens and plain header values for `authenticate`
//! - Standard Axum handler for the cohort GraphQL endpoint

use async_graphql::{Context, Request, Response};
use axum::{extract::Extension, http::HeaderMap, Json};
use uuid::Uuid;

use crate::adapter::CohortAdapter;
use crate::graphql::CohortSchema;

/// Request context that can be built from incoming HTTP headers
///
/// Implement this for your adapter's `RequestContext` to use
/// [`graphql_handler`].
pub trait FromRequestHeaders: Sized {
    fn from_headers(headers: &HeaderMap) -> Self;
}

impl FromRequestHeaders for HeaderMap {
    fn from_headers(headers: &HeaderMap) -> Self {
        headers.clone()
    }
}

/// Read a header as a UTF-8 string
pub fn extract_header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

/// Read a header holding a UUID, such as `x-user-id`
pub fn extract_uuid(headers: &HeaderMap, name: &str) -> Option<Uuid> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

/// Standard GraphQL handler with request context injection
///
/// Builds the adapter's request context from the headers and injects it into
/// the request so resolvers can hand it to `authenticate`.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{routing::post, Extension, Router};
/// use cohort_management::auth::graphql_handler;
///
/// let schema = cohort_management::graphql::build_schema(service);
/// let app = Router::new()
///     .route("/graphql", post(graphql_handler::<MyAdapter>))
///     .layer(Extension(schema));
/// ```
pub async fn graphql_handler<A>(
    Extension(schema): Extension<CohortSchema<A>>,
    headers: HeaderMap,
    req: Json<Request>,
) -> Json<Response>
where
    A: CohortAdapter,
    A::RequestContext: FromRequestHeaders,
{
    let request = req.0.data(A::RequestContext::from_headers(&headers));

    Json(schema.execute(request).await)
}

/// Get the adapter's request context from GraphQL context
pub fn get_request_context<'a, A: CohortAdapter>(
    ctx: &'a Context<'_>,
) -> Option<&'a A::RequestContext> {
    ctx.data_opt::<A::RequestContext>()
}
