mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::API;
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{chat, claims, maintenance, receipts, root, routes};

pub type DynAPI = Arc<dyn API + Send + Sync>;

pub fn app(api: DynAPI) -> Router {
    Router::new()
        .route("/", get(root::index))
        .route("/chat", post(chat::ask))
        .route("/claims", post(claims::create))
        .route("/claims/:id", get(claims::find))
        .route("/maintenance", post(maintenance::create))
        .route("/maintenance/:id", get(maintenance::find))
        .route("/receipts", post(receipts::create))
        .route("/receipts/:id", get(receipts::find))
        .route("/routes", post(routes::create))
        .route("/routes/:id", get(routes::find))
        .layer(Extension(api))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let app = app(Arc::new(api) as DynAPI);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|e| unexpected_error(format!("server stopped: {}", e)))
}
