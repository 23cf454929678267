use super::{helpers::require_images, prompts, Engine};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::ReceiptAPI,
    db::{find_record, insert_record, Document, RECEIPTS},
    entities::{Receipt, ReceiptScan},
    error::Error,
    generation::{generate_object, Prompt},
};

#[async_trait]
impl ReceiptAPI for Engine {
    #[tracing::instrument(skip(self, scan), fields(images = scan.images.len()))]
    async fn digitize_receipt(&self, scan: ReceiptScan) -> Result<Document<Receipt>, Error> {
        require_images(&scan.images)?;

        let prompt = Prompt::json(prompts::receipt()).with_images(&scan.images);
        let extraction = generate_object(self.generator.as_ref(), prompt).await?;

        let image_urls = self.blobs.upload(RECEIPTS, &scan.images).await?;
        let vehicle_id = scan
            .vehicle_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        insert_record(
            self.store.as_ref(),
            RECEIPTS,
            Receipt::new(extraction, image_urls, vehicle_id),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn find_receipt(&self, id: Uuid) -> Result<Document<Receipt>, Error> {
        find_record(self.store.as_ref(), RECEIPTS, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::Fakes;
    use crate::entities::Upload;

    #[tokio::test]
    async fn extracts_and_links_vehicle() {
        let fakes = Fakes::new(
            r#"{"estabelecimento": "Posto Ipiranga", "valorTotal": 250.4, "categoria": "combustivel", "litros": 40.1}"#,
        );
        let engine = fakes.engine();
        let scan = ReceiptScan {
            images: vec![Upload {
                filename: "cupom.jpg".into(),
                content_type: "image/jpeg".into(),
                bytes: vec![9; 16],
            }],
            vehicle_id: Some(" QWE4R56 ".into()),
        };

        let receipt = engine.digitize_receipt(scan).await.unwrap();

        assert_eq!(receipt.data.vehicle_id.as_deref(), Some("QWE4R56"));
        assert_eq!(receipt.data.extraction["litros"], 40.1);
        assert_eq!(receipt.data.image_urls, vec!["https://blobs.test/receipts/cupom.jpg"]);

        let stored = engine.find_receipt(receipt.id).await.unwrap();
        assert_eq!(stored.data.extraction["estabelecimento"], "Posto Ipiranga");
    }
}
