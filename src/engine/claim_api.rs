use super::{
    helpers::{require_images, require_text},
    prompts, Engine,
};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::ClaimAPI,
    db::{find_record, insert_record, Document, CLAIMS},
    entities::{Claim, ClaimReport},
    error::Error,
    generation::{generate_object, Prompt},
};

#[async_trait]
impl ClaimAPI for Engine {
    #[tracing::instrument(skip(self, report), fields(images = report.images.len()))]
    async fn analyze_claim(&self, report: ClaimReport) -> Result<Document<Claim>, Error> {
        require_images(&report.images)?;
        require_text("location", &report.location)?;
        require_text("model", &report.model)?;
        require_text("year", &report.year)?;
        require_text("driver_report", &report.driver_report)?;

        let prompt = Prompt::json(prompts::claim(&report)).with_images(&report.images);
        let analysis = generate_object(self.generator.as_ref(), prompt).await?;

        let image_urls = self.blobs.upload(CLAIMS, &report.images).await?;

        insert_record(self.store.as_ref(), CLAIMS, Claim::new(analysis, image_urls)).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_claim(&self, id: Uuid) -> Result<Document<Claim>, Error> {
        find_record(self.store.as_ref(), CLAIMS, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::Fakes;
    use crate::entities::{ClaimStatus, Upload};
    use crate::error::{INVALID_INPUT, MALFORMED_PAYLOAD};
    use std::sync::atomic::Ordering;

    const ANALYSIS: &str = r#"{
        "analiseGeral": { "nivelDano": "Moderado", "nivelUrgencia": "Média", "areaVeiculo": "Dianteira" },
        "descricaoDanos": "Para-choque dianteiro amassado.",
        "coerenciaRelato": "Coerente",
        "pecasNecessarias": [ { "nome": "Para-choque", "custo": 1200.0 } ],
        "estimativas": { "tempoReparo": "3 dias", "custoTotal": 1850.0 },
        "carModel": "Onix 2022"
    }"#;

    fn report() -> ClaimReport {
        ClaimReport {
            images: vec![
                Upload {
                    filename: "frente.jpg".into(),
                    content_type: "image/jpeg".into(),
                    bytes: vec![1, 2, 3],
                },
                Upload {
                    filename: "lateral.png".into(),
                    content_type: "image/png".into(),
                    bytes: vec![4, 5, 6],
                },
            ],
            location: "Campinas, SP".into(),
            model: "Onix".into(),
            year: "2022".into(),
            driver_report: "Bati de frente num poste em baixa velocidade.".into(),
        }
    }

    #[tokio::test]
    async fn analyzes_uploads_and_stores() {
        let fakes = Fakes::new(ANALYSIS);
        let engine = fakes.engine();

        let claim = engine.analyze_claim(report()).await.unwrap();

        assert_eq!(claim.data.status, ClaimStatus::Pending);
        assert_eq!(claim.data.analysis["carModel"], "Onix 2022");
        assert_eq!(
            claim.data.image_urls,
            vec![
                "https://blobs.test/claims/frente.jpg",
                "https://blobs.test/claims/lateral.png"
            ]
        );
        assert_eq!(fakes.blobs.uploads.load(Ordering::SeqCst), 2);

        let prompt = fakes.generator.last_prompt();
        assert!(prompt.json);
        assert_eq!(prompt.images.len(), 2);
        assert_eq!(prompt.images[1].mime_type, "image/png");
        assert!(prompt.text.contains("Campinas, SP"));

        let stored = engine.find_claim(claim.id).await.unwrap();
        assert_eq!(stored.data.analysis["estimativas"]["custoTotal"], 1850.0);
    }

    #[tokio::test]
    async fn non_json_analysis_stores_nothing() {
        let fakes = Fakes::new("Não consegui analisar as imagens.");

        let err = fakes.engine().analyze_claim(report()).await.unwrap_err();

        assert_eq!(err.code, MALFORMED_PAYLOAD);
        assert_eq!(fakes.blobs.uploads.load(Ordering::SeqCst), 0);
        assert_eq!(fakes.store.len(CLAIMS).await, 0);
    }

    #[tokio::test]
    async fn requires_images() {
        let fakes = Fakes::new(ANALYSIS);
        let mut report = report();
        report.images.clear();

        let err = fakes.engine().analyze_claim(report).await.unwrap_err();

        assert_eq!(err.code, INVALID_INPUT);
        assert!(fakes.generator.prompts.lock().unwrap().is_empty());
    }
}
