use async_trait::async_trait;
use uuid::Uuid;

use crate::db::Document;
use crate::entities::{
    Claim, ClaimReport, Maintenance, MaintenanceReport, Receipt, ReceiptScan, RouteRequest,
    RouteResult,
};
use crate::error::Error;

#[async_trait]
pub trait ChatAPI {
    async fn ask(&self, question: String) -> Result<String, Error>;
}

#[async_trait]
pub trait ClaimAPI {
    async fn analyze_claim(&self, report: ClaimReport) -> Result<Document<Claim>, Error>;
    async fn find_claim(&self, id: Uuid) -> Result<Document<Claim>, Error>;
}

#[async_trait]
pub trait MaintenanceAPI {
    async fn report_maintenance(
        &self,
        report: MaintenanceReport,
    ) -> Result<Document<Maintenance>, Error>;
    async fn find_maintenance(&self, id: Uuid) -> Result<Document<Maintenance>, Error>;
}

#[async_trait]
pub trait ReceiptAPI {
    async fn digitize_receipt(&self, scan: ReceiptScan) -> Result<Document<Receipt>, Error>;
    async fn find_receipt(&self, id: Uuid) -> Result<Document<Receipt>, Error>;
}

#[async_trait]
pub trait RouteAPI {
    async fn plan_route(&self, request: RouteRequest) -> Result<Document<RouteResult>, Error>;
    async fn find_route(&self, id: Uuid) -> Result<Document<RouteResult>, Error>;
}

pub trait API: ChatAPI + ClaimAPI + MaintenanceAPI + ReceiptAPI + RouteAPI {}
