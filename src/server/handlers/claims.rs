use axum::extract::{Extension, Json, Multipart, Path};
use uuid::Uuid;

use super::form::Form;
use crate::db::Document;
use crate::entities::{Claim, ClaimReport};
use crate::error::Error;
use crate::server::DynAPI;

pub async fn create(
    Extension(api): Extension<DynAPI>,
    multipart: Multipart,
) -> Result<Json<Document<Claim>>, Error> {
    let mut form = Form::read(multipart, "images").await?;

    let report = ClaimReport {
        location: form.text("location"),
        model: form.text("model"),
        year: form.text("year"),
        driver_report: form.text("driver_report"),
        images: form.files,
    };

    let claim = api.analyze_claim(report).await?;

    Ok(claim.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Document<Claim>>, Error> {
    let claim = api.find_claim(id).await?;

    Ok(claim.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::Fakes;
    use crate::error::INVALID_INPUT;
    use crate::server::handlers::form::tests::{multipart, Part};
    use crate::server::handlers::tests::api;

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let fakes = Fakes::new("{}");
        let form = multipart(&[
            Part::File("images", "frente.jpg", "image/jpeg", b"\xff\xd8\xff"),
            Part::Text("location", "Campinas, SP"),
        ])
        .await;

        let err = create(Extension(api(&fakes)), form).await.unwrap_err();

        assert_eq!(err.code, INVALID_INPUT);
        assert!(err.message.starts_with("model"));
    }

    #[tokio::test]
    async fn creates_and_finds_a_claim() {
        let fakes = Fakes::new(r#"{"descricaoDanos": "Risco na porta"}"#);
        let form = multipart(&[
            Part::File("images", "porta.jpg", "image/jpeg", b"\xff\xd8\xff"),
            Part::Text("location", "Curitiba, PR"),
            Part::Text("model", "HB20"),
            Part::Text("year", "2021"),
            Part::Text("driver_report", "Outro carro raspou na porta."),
        ])
        .await;

        let Json(claim) = create(Extension(api(&fakes)), form).await.unwrap();
        let Json(found) = find(Extension(api(&fakes)), Path(claim.id)).await.unwrap();

        assert_eq!(found.data.analysis["descricaoDanos"], "Risco na porta");
        assert_eq!(found.data.image_urls.len(), 1);
    }
}
