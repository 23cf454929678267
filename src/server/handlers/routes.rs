use axum::extract::{Extension, Json, Path};

use super::json::JsonBody;
use uuid::Uuid;

use crate::db::Document;
use crate::entities::{RouteRequest, RouteResult};
use crate::error::Error;
use crate::server::DynAPI;

pub async fn create(
    Extension(api): Extension<DynAPI>,
    JsonBody(request): JsonBody<RouteRequest>,
) -> Result<Json<Document<RouteResult>>, Error> {
    let route = api.plan_route(request).await?;

    Ok(route.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Document<RouteResult>>, Error> {
    let route = api.find_route(id).await?;

    Ok(route.into())
}
