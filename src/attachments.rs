//! Read-only projections over a company's attachments document.
//!
//! The `companies/{siren}/attachments` payload lists three families of
//! filings: PDF bilans (`bilans`), structured filings (`bilansSaisis`) and
//! deeds (`actes`). Structured filings are the ones the extraction engine
//! operates on.

use chrono::NaiveDate;
use serde_json::Value;

use crate::financials::{self, BilanType, FinancialMetric};
use crate::json::{nested, nested_str};
use crate::models::{ActeSummary, BilanPdfSummary, BilanSaisiSummary};

/// A fetched attachments document.
#[derive(Debug, Clone)]
pub struct Attachments {
    raw: Value,
}

/// Closing/deposit dates arrive as ISO dates, sometimes with a trailing
/// time component.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let date_part = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

impl Attachments {
    pub fn new(raw: Value) -> Self {
        Attachments { raw }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_inner(self) -> Value {
        self.raw
    }

    fn entries(&self, key: &str) -> &[Value] {
        self.raw
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// PDF bilans, in listing order.
    pub fn bilans_pdf(&self) -> Vec<BilanPdfSummary> {
        self.entries("bilans")
            .iter()
            .enumerate()
            .map(|(position, bilan)| BilanPdfSummary {
                position,
                id: nested_str(bilan, "/id").map(str::to_string),
                date_cloture: nested_str(bilan, "/dateCloture").and_then(parse_date),
            })
            .collect()
    }

    pub fn bilans_pdf_len(&self) -> usize {
        self.entries("bilans").len()
    }

    /// Structured filings, in listing order.
    pub fn bilans_saisis(&self) -> Vec<BilanSaisiSummary> {
        self.entries("bilansSaisis")
            .iter()
            .enumerate()
            .map(|(position, bilan)| BilanSaisiSummary {
                position,
                id: nested_str(bilan, "/id").map(str::to_string),
                date_cloture: nested_str(bilan, "/dateCloture").and_then(parse_date),
                date_depot: nested_str(bilan, "/dateDepot").and_then(parse_date),
                type_bilan: nested_str(bilan, "/typeBilan").map(str::to_string),
                confidentiality: nested_str(bilan, "/confidentiality").map(str::to_string),
                num_chrono: nested_str(bilan, "/numChrono").map(str::to_string),
                updated_at: nested_str(bilan, "/updatedAt").map(str::to_string),
            })
            .collect()
    }

    pub fn bilans_saisis_len(&self) -> usize {
        self.entries("bilansSaisis").len()
    }

    /// A view over the structured filing at `position`.
    pub fn bilan_saisi(&self, position: usize) -> Option<BilanSaisi<'_>> {
        self.entries("bilansSaisis")
            .get(position)
            .map(BilanSaisi::new)
    }

    /// Deeds, in listing order.
    pub fn actes(&self) -> Vec<ActeSummary> {
        self.entries("actes")
            .iter()
            .enumerate()
            .map(|(position, acte)| ActeSummary {
                position,
                id: nested_str(acte, "/id").map(str::to_string),
                date_depot: nested_str(acte, "/dateDepot").and_then(parse_date),
                type_rdd: nested_str(acte, "/typeRdd").map(str::to_string),
            })
            .collect()
    }

    pub fn actes_len(&self) -> usize {
        self.entries("actes").len()
    }

    /// Resolve one metric for the structured filing at `position`, reading
    /// the filing's own `typeBilan` tag.
    ///
    /// Every miss — no filing at that position, unknown schema tag, no
    /// mapping entry, data not present — is `None`, so a caller building a
    /// dashboard of metrics gets a partial record rather than an error.
    pub fn metric(
        &self,
        position: usize,
        metric: FinancialMetric,
        prior_year: bool,
    ) -> Option<i64> {
        let bilan_type = self.bilan_saisi(position)?.bilan_type()?;
        financials::metric(&self.raw, position, bilan_type, metric, prior_year)
    }
}

/// A view over one structured filing and its identity metadata.
#[derive(Debug, Clone, Copy)]
pub struct BilanSaisi<'a> {
    raw: &'a Value,
}

impl<'a> BilanSaisi<'a> {
    fn new(raw: &'a Value) -> Self {
        BilanSaisi { raw }
    }

    pub fn raw(&self) -> &'a Value {
        self.raw
    }

    pub fn id(&self) -> Option<&'a str> {
        nested_str(self.raw, "/id")
    }

    pub fn type_bilan_tag(&self) -> Option<&'a str> {
        nested_str(self.raw, "/typeBilan")
    }

    /// The filing's balance-sheet schema, when the tag is recognized.
    pub fn bilan_type(&self) -> Option<BilanType> {
        self.type_bilan_tag().and_then(BilanType::from_tag)
    }

    pub fn date_cloture(&self) -> Option<NaiveDate> {
        nested_str(self.raw, "/dateCloture").and_then(parse_date)
    }

    pub fn date_depot(&self) -> Option<NaiveDate> {
        nested_str(self.raw, "/dateDepot").and_then(parse_date)
    }

    pub fn confidentiality(&self) -> Option<&'a str> {
        nested_str(self.raw, "/confidentiality")
    }

    pub fn num_chrono(&self) -> Option<&'a str> {
        nested_str(self.raw, "/numChrono")
    }

    pub fn updated_at(&self) -> Option<&'a str> {
        nested_str(self.raw, "/updatedAt")
    }

    pub fn version(&self) -> Option<&'a Value> {
        nested(self.raw, "/bilanSaisi/version")
    }

    // Identity block of the embedded bilan.

    fn identite(&self, key: &str) -> Option<&'a Value> {
        nested(self.raw, "/bilanSaisi/bilan/identite").and_then(|identite| {
            identite.get(key).filter(|v| !v.is_null())
        })
    }

    fn identite_str(&self, key: &str) -> Option<&'a str> {
        self.identite(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn siren(&self) -> Option<&'a str> {
        self.identite_str("siren")
    }

    pub fn address(&self) -> Option<&'a str> {
        self.identite_str("adresse")
    }

    pub fn processing_info(&self) -> Option<&'a str> {
        self.identite_str("infoTraitement")
    }

    pub fn confidentiality_code(&self) -> Option<&'a str> {
        self.identite_str("codeConfidentialite")
    }

    pub fn entry_code(&self) -> Option<&'a str> {
        self.identite_str("codeSaisie")
    }

    pub fn currency_code(&self) -> Option<&'a str> {
        self.identite_str("codeDevise")
    }

    pub fn currency_origin_code(&self) -> Option<&'a str> {
        self.identite_str("codeOrigineDevise")
    }

    pub fn type_bilan_code(&self) -> Option<&'a str> {
        self.identite_str("codeTypeBilan")
    }

    pub fn management_number(&self) -> Option<&'a str> {
        self.identite_str("numGestion")
    }

    pub fn deposit_number(&self) -> Option<&'a str> {
        self.identite_str("numDepot")
    }

    pub fn registry_code(&self) -> Option<&'a str> {
        self.identite_str("codeGreffe")
    }

    pub fn fiscal_year_duration(&self) -> Option<&'a str> {
        self.identite_str("dureeExerciceN")
    }

    pub fn prior_fiscal_year_duration(&self) -> Option<&'a str> {
        self.identite_str("dureeExerciceNMoins1")
    }

    pub fn fiscal_year_closing_date(&self) -> Option<&'a str> {
        self.identite_str("dateClotureExercice")
    }

    pub fn prior_fiscal_year_closing_date(&self) -> Option<&'a str> {
        self.identite_str("dateClotureExerciceNMoins1")
    }
}
