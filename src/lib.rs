pub mod api;
pub mod config;
pub mod db;
pub mod engine;
pub mod entities;
pub mod error;
pub mod external;
pub mod generation;
pub mod geocoding;
pub mod routing;
pub mod server;
pub mod storage;
