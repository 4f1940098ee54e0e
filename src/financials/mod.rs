//! Financial metric extraction from structured filings ("bilans saisis").
//!
//! `mapping` declares where each metric lives per balance-sheet schema;
//! `extractor` resolves a metric against a raw filing document using the
//! declared strategy (direct lookup, ordered fallback, or component sum).

pub mod extractor;
pub mod mapping;

pub use extractor::{extract_cell, extract_sum, extract_with_fallback, metric};
pub use mapping::{
    BilanType, CodeMapping, Component, FinancialMetric, Resolution, ValueField, ALL_METRICS,
};
