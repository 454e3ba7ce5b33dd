//! `roundbook-recon`: player rounds and transactions reconciliation engine.
//!
//! Pure engine crate: receives raw export text, returns normalized
//! aggregates, a solvency verdict and a rendered report.
//! No CLI dependencies.

pub mod aggregate;
pub mod cashback;
pub mod classify;
pub mod columns;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod render;
pub mod table;

pub use config::{ReportConfig, StatusFilter};
pub use engine::{generate, generate_cashback};
pub use error::ReportError;
pub use model::{PlayerReport, RoundRecord, TransactionRecord};
pub use render::{format_currency, render};
