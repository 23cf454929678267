use super::{helpers::require_text, prompts, Engine};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::MaintenanceAPI,
    db::{find_record, insert_record, Document, MAINTENANCE},
    entities::{Maintenance, MaintenanceReport},
    error::Error,
    generation::{generate_object, Prompt},
};

#[async_trait]
impl MaintenanceAPI for Engine {
    #[tracing::instrument(skip(self, report), fields(vehicle = %report.vehicle_id))]
    async fn report_maintenance(
        &self,
        report: MaintenanceReport,
    ) -> Result<Document<Maintenance>, Error> {
        require_text("vehicle_id", &report.vehicle_id)?;
        require_text("driver_report", &report.driver_report)?;

        let diagnosis = generate_object(
            self.generator.as_ref(),
            Prompt::json(prompts::maintenance(&report)),
        )
        .await?;

        insert_record(
            self.store.as_ref(),
            MAINTENANCE,
            Maintenance::new(diagnosis, report),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn find_maintenance(&self, id: Uuid) -> Result<Document<Maintenance>, Error> {
        find_record(self.store.as_ref(), MAINTENANCE, id).await
    }
}
