use axum::response::IntoResponse;

// Undocumented banner route; useful as a liveness probe behind proxies.
pub async fn root() -> impl IntoResponse {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}
