use axum::extract::{Extension, Json, Multipart, Path};
use uuid::Uuid;

use super::form::Form;
use crate::db::Document;
use crate::entities::{Receipt, ReceiptScan};
use crate::error::Error;
use crate::server::DynAPI;

pub async fn create(
    Extension(api): Extension<DynAPI>,
    multipart: Multipart,
) -> Result<Json<Document<Receipt>>, Error> {
    let mut form = Form::read(multipart, "images").await?;

    let scan = ReceiptScan {
        vehicle_id: form.optional("vehicle_id"),
        images: form.files,
    };

    let receipt = api.digitize_receipt(scan).await?;

    Ok(receipt.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Document<Receipt>>, Error> {
    let receipt = api.find_receipt(id).await?;

    Ok(receipt.into())
}
