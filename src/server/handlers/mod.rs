pub mod chat;
pub mod claims;
mod form;
mod json;
pub mod maintenance;
pub mod receipts;
pub mod root;
pub mod routes;
