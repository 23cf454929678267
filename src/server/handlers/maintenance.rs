use axum::extract::{Extension, Json, Path};

use super::json::JsonBody;
use uuid::Uuid;

use crate::db::Document;
use crate::entities::{Maintenance, MaintenanceReport};
use crate::error::Error;
use crate::server::DynAPI;

pub async fn create(
    Extension(api): Extension<DynAPI>,
    JsonBody(report): JsonBody<MaintenanceReport>,
) -> Result<Json<Document<Maintenance>>, Error> {
    let maintenance = api.report_maintenance(report).await?;

    Ok(maintenance.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Document<Maintenance>>, Error> {
    let maintenance = api.find_maintenance(id).await?;

    Ok(maintenance.into())
}
