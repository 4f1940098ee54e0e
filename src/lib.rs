//! Client library for the INPI company-registry API
//! (Registre National des Entreprises).
//!
//! Authenticates against the registry, fetches company and filing records,
//! and exposes structured accessors over the deeply nested JSON the API
//! returns — including a rule-driven extractor for financial metrics
//! (equity, turnover, profit/loss, headcount) across the six balance-sheet
//! schema variants used by French filings.

pub mod api;
pub mod attachments;
pub mod company;
pub mod error;
pub mod financials;
pub mod json;
pub mod models;
pub mod validators;

pub use api::InpiClient;
pub use attachments::{Attachments, BilanSaisi};
pub use company::{Company, Director, DirectorKind};
pub use error::InpiError;
pub use financials::{BilanType, FinancialMetric};
pub use models::Config;
pub use validators::{Siren, Siret};
