use axum::extract::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Status {
    message: &'static str,
}

pub async fn index() -> Json<Status> {
    Json(Status {
        message: "Assistente de Frota IA está no ar",
    })
}
