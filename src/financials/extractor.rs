//! Extraction of financial metrics from structured filings.
//!
//! A filing arrives as deeply nested JSON:
//! `bilansSaisis[position].bilanSaisi.bilan.detail.pages[].liasses[]`,
//! where each liasse is `{code, m1, m2, m3, m4}` with string-encoded
//! integers in the value slots. Not every filing carries every line, and
//! malformed cells are common, so every miss here is `None` — extraction
//! never fails hard. Callers assembling a dashboard of metrics get a
//! partially filled record instead of an error.

use serde_json::Value;
use tracing::debug;

use super::mapping::{self, BilanType, CodeMapping, Component, FinancialMetric, Resolution, ValueField};

/// Scan pages for the first liasse with the given code and read one of
/// its value slots as an integer.
///
/// Only the first matching liasse is consulted; if its cell is missing or
/// unparseable the result is `None` even when a later liasse carries the
/// same code.
pub fn extract_cell(pages: &[Value], field: ValueField, code: &str) -> Option<i64> {
    let liasse = pages
        .iter()
        .filter_map(|page| page.get("liasses")?.as_array())
        .flatten()
        .find(|liasse| liasse.get("code").and_then(Value::as_str) == Some(code))?;

    parse_cell(liasse.get(field.key())?)
}

/// The value slots are string-encoded integers; some filings carry plain
/// JSON numbers instead.
fn parse_cell(cell: &Value) -> Option<i64> {
    match cell {
        Value::String(s) => s.trim().parse().ok(),
        other => other.as_i64(),
    }
}

/// Try several cell locations in priority order; the first hit wins
/// regardless of the values behind later entries.
pub fn extract_with_fallback(pages: &[Value], mappings: &[CodeMapping]) -> Option<i64> {
    mappings
        .iter()
        .find_map(|mapping| extract_cell(pages, mapping.field, mapping.code))
}

/// Sum several component cells, with absent components contributing zero.
///
/// A total of exactly zero is reported as absent: for reconstructed
/// metrics a zero sum is indistinguishable from "no data", and
/// under-reporting absence is preferred over asserting a false zero.
pub fn extract_sum(pages: &[Value], components: &[Component]) -> Option<i64> {
    let total: i64 = components
        .iter()
        .filter_map(|component| extract_cell(pages, component.mapping.field, component.mapping.code))
        .sum();

    (total > 0).then_some(total)
}

/// Resolve one metric from a raw attachments document.
///
/// Navigates to the pages of the filing at `position`, looks up the
/// mapping-table entry for (metric, bilan_type, prior_year) and dispatches
/// on its declared strategy. Missing path segments, an out-of-range
/// position and uncovered (metric, bilan-type) pairs all yield `None`.
pub fn metric(
    doc: &Value,
    position: usize,
    bilan_type: BilanType,
    metric: FinancialMetric,
    prior_year: bool,
) -> Option<i64> {
    let pages = filing_pages(doc, position)?;

    let resolved = match mapping::resolution(metric, bilan_type, prior_year)? {
        Resolution::Direct(m) => extract_cell(pages, m.field, m.code),
        Resolution::Fallback(chain) => extract_with_fallback(pages, chain),
        Resolution::Sum(components) => extract_sum(pages, components),
    };

    debug!(
        metric = metric.label(),
        bilan_type = bilan_type.tag(),
        position,
        prior_year,
        value = resolved,
        "resolved metric"
    );
    resolved
}

/// The line-item pages of the filing at `position`, if the document has
/// the expected shape.
pub fn filing_pages(doc: &Value, position: usize) -> Option<&[Value]> {
    doc.get("bilansSaisis")?
        .as_array()?
        .get(position)?
        .pointer("/bilanSaisi/bilan/detail/pages")?
        .as_array()
        .map(Vec::as_slice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::financials::mapping::ValueField::{M1, M2, M3};
    use serde_json::json;

    fn pages(liasses: Value) -> Vec<Value> {
        vec![json!({ "liasses": liasses })]
    }

    /// An attachments document with one filing holding the given liasses.
    fn doc_with_liasses(liasses: Value) -> Value {
        json!({
            "bilansSaisis": [{
                "bilanSaisi": {
                    "bilan": {
                        "detail": {
                            "pages": [{ "liasses": liasses }]
                        }
                    }
                }
            }]
        })
    }

    #[test]
    fn extract_cell_reads_string_encoded_integer() {
        let pages = pages(json!([{"code": "DL", "m1": "50000", "m2": "48000"}]));
        assert_eq!(extract_cell(&pages, M1, "DL"), Some(50000));
        assert_eq!(extract_cell(&pages, M2, "DL"), Some(48000));
    }

    #[test]
    fn extract_cell_accepts_plain_json_numbers() {
        let pages = pages(json!([{"code": "DL", "m1": 50000}]));
        assert_eq!(extract_cell(&pages, M1, "DL"), Some(50000));
    }

    #[test]
    fn extract_cell_misses_are_none() {
        let pages = pages(json!([{"code": "DL", "m1": "not a number"}]));
        assert_eq!(extract_cell(&pages, M1, "DL"), None); // unparseable
        assert_eq!(extract_cell(&pages, M2, "DL"), None); // missing slot
        assert_eq!(extract_cell(&pages, M1, "ZZ"), None); // unknown code
        assert_eq!(extract_cell(&[], M1, "DL"), None); // no pages
    }

    #[test]
    fn extract_cell_ignores_pages_without_liasses() {
        let pages = vec![
            json!({"other": true}),
            json!({"liasses": [{"code": "FJ", "m3": "900"}]}),
        ];
        assert_eq!(extract_cell(&pages, M3, "FJ"), Some(900));
    }

    #[test]
    fn extract_cell_is_page_order_independent_for_unique_code() {
        let a = json!({"liasses": [{"code": "AA", "m1": "1"}]});
        let b = json!({"liasses": [{"code": "DL", "m1": "7"}]});
        let forward = vec![a.clone(), b.clone()];
        let backward = vec![b, a];
        assert_eq!(extract_cell(&forward, M1, "DL"), Some(7));
        assert_eq!(extract_cell(&backward, M1, "DL"), Some(7));
    }

    #[test]
    fn extract_cell_stops_at_first_matching_liasse() {
        let pages = pages(json!([
            {"code": "DL", "m1": "bad"},
            {"code": "DL", "m1": "1000"}
        ]));
        // The first DL liasse wins even though its cell is unparseable.
        assert_eq!(extract_cell(&pages, M1, "DL"), None);
    }

    #[test]
    fn fallback_prefers_earlier_entries_regardless_of_value() {
        let pages = pages(json!([
            {"code": "HN", "m1": "100"},
            {"code": "DI", "m1": "99999"}
        ]));
        let chain = [
            CodeMapping { field: M1, code: "HN" },
            CodeMapping { field: M1, code: "DI" },
        ];
        assert_eq!(extract_with_fallback(&pages, &chain), Some(100));
    }

    #[test]
    fn fallback_moves_on_when_primary_is_absent() {
        let pages = pages(json!([{"code": "DI", "m1": "1200"}]));
        let chain = [
            CodeMapping { field: M1, code: "HN" },
            CodeMapping { field: M1, code: "DI" },
        ];
        assert_eq!(extract_with_fallback(&pages, &chain), Some(1200));
        assert_eq!(extract_with_fallback(&pages, &[]), None);
    }

    #[test]
    fn sum_treats_absent_components_as_zero() {
        let pages = pages(json!([
            {"code": "210", "m1": "1000"},
            {"code": "214", "m1": "2000"}
        ]));
        let components = [
            Component { name: "ventes", mapping: CodeMapping { field: M1, code: "210" } },
            Component { name: "biens", mapping: CodeMapping { field: M1, code: "214" } },
            Component { name: "services", mapping: CodeMapping { field: M1, code: "218" } },
        ];
        assert_eq!(extract_sum(&pages, &components), Some(3000));
    }

    #[test]
    fn sum_of_zero_is_absent() {
        let components = [
            Component { name: "a", mapping: CodeMapping { field: M1, code: "210" } },
            Component { name: "b", mapping: CodeMapping { field: M1, code: "214" } },
        ];

        // All components absent.
        assert_eq!(extract_sum(&pages(json!([])), &components), None);

        // Components present but cancelling to zero.
        let cancelling = pages(json!([
            {"code": "210", "m1": "500"},
            {"code": "214", "m1": "-500"}
        ]));
        assert_eq!(extract_sum(&cancelling, &components), None);

        // Explicit zeros.
        let zeros = pages(json!([
            {"code": "210", "m1": "0"},
            {"code": "214", "m1": "0"}
        ]));
        assert_eq!(extract_sum(&zeros, &components), None);
    }

    #[test]
    fn metric_equity_complete_current_and_prior_year() {
        let doc = doc_with_liasses(json!([{"code": "DL", "m1": "50000", "m2": "48000"}]));
        assert_eq!(
            metric(&doc, 0, BilanType::Complete, FinancialMetric::Equity, false),
            Some(50000)
        );
        assert_eq!(
            metric(&doc, 0, BilanType::Complete, FinancialMetric::Equity, true),
            Some(48000)
        );
    }

    #[test]
    fn metric_turnover_simplified_sums_components() {
        let doc = doc_with_liasses(json!([
            {"code": "210", "m1": "1000"},
            {"code": "214", "m1": "2000"},
            {"code": "218", "m1": "0"}
        ]));
        assert_eq!(
            metric(&doc, 0, BilanType::Simplified, FinancialMetric::Turnover, false),
            Some(3000)
        );
    }

    #[test]
    fn metric_turnover_simplified_zero_sum_is_absent() {
        let doc = doc_with_liasses(json!([
            {"code": "210", "m1": "0"},
            {"code": "218", "m1": "0"}
        ]));
        assert_eq!(
            metric(&doc, 0, BilanType::Simplified, FinancialMetric::Turnover, false),
            None
        );
    }

    #[test]
    fn metric_profit_loss_complete_uses_fallback() {
        let doc = doc_with_liasses(json!([{"code": "DI", "m1": "1200"}]));
        assert_eq!(
            metric(&doc, 0, BilanType::Complete, FinancialMetric::ProfitLoss, false),
            Some(1200)
        );
    }

    #[test]
    fn metric_without_table_entry_is_absent() {
        let doc = doc_with_liasses(json!([{"code": "DL", "m1": "50000"}]));
        assert_eq!(
            metric(&doc, 0, BilanType::AgriculturalComplete, FinancialMetric::Equity, false),
            None
        );
    }

    #[test]
    fn metric_survives_malformed_documents() {
        for doc in [
            json!({}),
            json!({"bilansSaisis": "not an array"}),
            json!({"bilansSaisis": []}),
            json!({"bilansSaisis": [{"bilanSaisi": {}}]}),
            json!(null),
        ] {
            assert_eq!(
                metric(&doc, 0, BilanType::Complete, FinancialMetric::Equity, false),
                None
            );
        }
    }

    #[test]
    fn metric_position_out_of_range_is_absent() {
        let doc = doc_with_liasses(json!([{"code": "DL", "m1": "50000"}]));
        assert_eq!(
            metric(&doc, 5, BilanType::Complete, FinancialMetric::Equity, false),
            None
        );
    }

    #[test]
    fn metric_bank_equity_sums_passif_lines() {
        let doc = doc_with_liasses(json!([
            {"code": "P3", "m1": "100", "m2": "90"},
            {"code": "P5", "m1": "40", "m2": "35"},
            {"code": "P8", "m1": "10", "m2": "-5"}
        ]));
        assert_eq!(
            metric(&doc, 0, BilanType::Bank, FinancialMetric::Equity, false),
            Some(150)
        );
        assert_eq!(
            metric(&doc, 0, BilanType::Bank, FinancialMetric::Equity, true),
            Some(120)
        );
    }

    #[test]
    fn metric_bank_net_result_falls_back_to_passif() {
        let doc = doc_with_liasses(json!([{"code": "P8", "m1": "700"}]));
        assert_eq!(
            metric(&doc, 0, BilanType::Bank, FinancialMetric::NetResult, false),
            Some(700)
        );
    }
}
