//! Static mapping of financial metrics to line-item locations.
//!
//! Where a metric lives inside a filing depends on which balance-sheet
//! schema the filing follows ('Type Bilan', Version 5 - Juin 2025). For
//! some (metric, bilan-type) pairs the metric is a single line; for others
//! it has a preferred location plus a fallback, or must be reconstructed
//! by summing several raw lines. Each table entry declares exactly one of
//! those three strategies, with current-year and prior-year variants as
//! separate parallel entries.

/// Balance-sheet schema variant of a filing, from its `typeBilan` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BilanType {
    /// Type Bilan "C": comptes annuels complets
    Complete,
    /// Type Bilan "S": comptes annuels simplifiés
    Simplified,
    /// Type Bilan "K": comptes consolidés
    Consolidated,
    /// Type Bilan "B": comptes annuels de banques
    Bank,
    /// Type Bilan "AC": comptes annuels de type agricole complets
    AgriculturalComplete,
    /// Type Bilan "AS": bilans de type agricole simplifiés
    AgriculturalSimplified,
}

impl BilanType {
    /// Parse a `typeBilan` tag. Unknown tags yield `None`; a filing with
    /// an unrecognized schema is treated as having no extractable metrics.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "C" => Some(BilanType::Complete),
            "S" => Some(BilanType::Simplified),
            "K" => Some(BilanType::Consolidated),
            "B" => Some(BilanType::Bank),
            "AC" => Some(BilanType::AgriculturalComplete),
            "AS" => Some(BilanType::AgriculturalSimplified),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            BilanType::Complete => "C",
            BilanType::Simplified => "S",
            BilanType::Consolidated => "K",
            BilanType::Bank => "B",
            BilanType::AgriculturalComplete => "AC",
            BilanType::AgriculturalSimplified => "AS",
        }
    }
}

/// The five extractable metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinancialMetric {
    /// Capitaux propres
    Equity,
    /// Bénéfice ou perte
    ProfitLoss,
    /// Résultat de l'exercice (bank filings)
    NetResult,
    /// Chiffre d'affaires
    Turnover,
    /// Effectif
    Headcount,
}

pub const ALL_METRICS: [FinancialMetric; 5] = [
    FinancialMetric::Equity,
    FinancialMetric::ProfitLoss,
    FinancialMetric::NetResult,
    FinancialMetric::Turnover,
    FinancialMetric::Headcount,
];

impl FinancialMetric {
    pub fn label(&self) -> &'static str {
        match self {
            FinancialMetric::Equity => "capitaux propres",
            FinancialMetric::ProfitLoss => "bénéfice/perte",
            FinancialMetric::NetResult => "résultat de l'exercice",
            FinancialMetric::Turnover => "chiffre d'affaires",
            FinancialMetric::Headcount => "effectif",
        }
    }
}

/// One of the four value-column slots of a line item.
///
/// The meaning of a slot (current year, prior year, gross, net) varies by
/// bilan type; the mapping table picks the right one per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueField {
    M1,
    M2,
    M3,
    M4,
}

impl ValueField {
    pub fn key(&self) -> &'static str {
        match self {
            ValueField::M1 => "m1",
            ValueField::M2 => "m2",
            ValueField::M3 => "m3",
            ValueField::M4 => "m4",
        }
    }
}

/// Location of one numeric cell: a value slot plus a liasse line code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeMapping {
    pub field: ValueField,
    pub code: &'static str,
}

/// A named line item contributing to a component sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    pub name: &'static str,
    pub mapping: CodeMapping,
}

/// Resolution strategy declared by one table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The metric is a single line.
    Direct(CodeMapping),
    /// Preferred locations in priority order; first hit wins.
    Fallback(&'static [CodeMapping]),
    /// The metric is the sum of several raw lines.
    Sum(&'static [Component]),
}

const fn m(field: ValueField, code: &'static str) -> CodeMapping {
    CodeMapping { field, code }
}

const fn c(name: &'static str, field: ValueField, code: &'static str) -> Component {
    Component {
        name,
        mapping: m(field, code),
    }
}

use ValueField::{M1, M2, M3, M4};

// Turnover under the simplified schema is reconstructed from the
// domestic/export sales and production lines of the Compte de Résultat.
static TURNOVER_SIMPLIFIED: [Component; 6] = [
    c("ventes_marchandises_export", M1, "209"),
    c("production_biens_export", M1, "215"),
    c("production_services_export", M1, "217"),
    c("ventes_marchandises_france", M1, "210"),
    c("production_biens_france", M1, "214"),
    c("production_services_france", M1, "218"),
];

static TURNOVER_SIMPLIFIED_PRIOR: [Component; 3] = [
    c("ventes_marchandises", M2, "210"),
    c("production_biens", M2, "214"),
    c("production_services", M2, "218"),
];

// Bank filings do not report equity on one line; it is the sum of the
// capital and reserve lines of the Passif.
static EQUITY_BANK: [Component; 6] = [
    c("capital_souscrit", M1, "P3"),
    c("primes_emission", M1, "P4"),
    c("reserves", M1, "P5"),
    c("ecarts_reevaluation", M1, "P6"),
    c("report_nouveau", M1, "P7"),
    c("resultat_exercice", M1, "P8"),
];

static EQUITY_BANK_PRIOR: [Component; 6] = [
    c("capital_souscrit", M2, "P3"),
    c("primes_emission", M2, "P4"),
    c("reserves", M2, "P5"),
    c("ecarts_reevaluation", M2, "P6"),
    c("report_nouveau", M2, "P7"),
    c("resultat_exercice", M2, "P8"),
];

// Profit/loss has a preferred location in the Compte de Résultat and a
// fallback in the Bilan - Passif.
static PROFIT_LOSS_COMPLETE: [CodeMapping; 2] = [m(M1, "HN"), m(M1, "DI")];
static PROFIT_LOSS_COMPLETE_PRIOR: [CodeMapping; 2] = [m(M2, "HN"), m(M2, "DI")];
static PROFIT_LOSS_SIMPLIFIED: [CodeMapping; 2] = [m(M1, "310"), m(M3, "136")];
static PROFIT_LOSS_SIMPLIFIED_PRIOR: [CodeMapping; 2] = [m(M2, "310"), m(M4, "136")];
static NET_RESULT_BANK: [CodeMapping; 2] = [m(M1, "R3"), m(M1, "P8")];
static NET_RESULT_BANK_PRIOR: [CodeMapping; 2] = [m(M2, "R3"), m(M2, "P8")];

/// Look up the resolution strategy for a (metric, bilan-type) pair.
///
/// Coverage is intentionally partial: `None` means the metric is not
/// applicable to that schema, which is an expected outcome.
pub fn resolution(
    metric: FinancialMetric,
    bilan_type: BilanType,
    prior_year: bool,
) -> Option<Resolution> {
    use BilanType::*;
    use FinancialMetric::*;
    use Resolution::*;

    let entry = match (metric, bilan_type, prior_year) {
        (Turnover, Complete | Consolidated, false) => Direct(m(M3, "FJ")),
        (Turnover, Complete | Consolidated, true) => Direct(m(M4, "FJ")),
        (Turnover, Simplified, false) => Sum(&TURNOVER_SIMPLIFIED),
        (Turnover, Simplified, true) => Sum(&TURNOVER_SIMPLIFIED_PRIOR),

        (Equity, Complete | Consolidated, false) => Direct(m(M1, "DL")),
        (Equity, Complete | Consolidated, true) => Direct(m(M2, "DL")),
        (Equity, Simplified, false) => Direct(m(M3, "142")),
        (Equity, Simplified, true) => Direct(m(M4, "142")),
        (Equity, Bank, false) => Sum(&EQUITY_BANK),
        (Equity, Bank, true) => Sum(&EQUITY_BANK_PRIOR),

        (ProfitLoss, Consolidated, false) => Direct(m(M1, "R6")),
        (ProfitLoss, Consolidated, true) => Direct(m(M2, "R6")),
        (ProfitLoss, Complete, false) => Fallback(&PROFIT_LOSS_COMPLETE),
        (ProfitLoss, Complete, true) => Fallback(&PROFIT_LOSS_COMPLETE_PRIOR),
        (ProfitLoss, Simplified, false) => Fallback(&PROFIT_LOSS_SIMPLIFIED),
        (ProfitLoss, Simplified, true) => Fallback(&PROFIT_LOSS_SIMPLIFIED_PRIOR),

        (NetResult, Bank, false) => Fallback(&NET_RESULT_BANK),
        (NetResult, Bank, true) => Fallback(&NET_RESULT_BANK_PRIOR),

        (Headcount, Simplified, false) => Direct(m(M1, "376")),
        (Headcount, Simplified, true) => Direct(m(M2, "376")),
        (Headcount, Complete, false) => Direct(m(M1, "YP")),
        (Headcount, Complete, true) => Direct(m(M2, "YP")),

        _ => return None,
    };

    Some(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bilan_type_tag_round_trip() {
        for tag in ["C", "S", "K", "B", "AC", "AS"] {
            assert_eq!(BilanType::from_tag(tag).unwrap().tag(), tag);
        }
        assert_eq!(BilanType::from_tag("X"), None);
        assert_eq!(BilanType::from_tag(""), None);
    }

    #[test]
    fn equity_complete_is_direct_dl() {
        let entry = resolution(FinancialMetric::Equity, BilanType::Complete, false).unwrap();
        assert_eq!(entry, Resolution::Direct(m(M1, "DL")));
        let prior = resolution(FinancialMetric::Equity, BilanType::Complete, true).unwrap();
        assert_eq!(prior, Resolution::Direct(m(M2, "DL")));
    }

    #[test]
    fn equity_bank_is_component_sum() {
        match resolution(FinancialMetric::Equity, BilanType::Bank, false) {
            Some(Resolution::Sum(components)) => {
                assert_eq!(components.len(), 6);
                assert!(components.iter().all(|cmp| cmp.mapping.field == M1));
            }
            other => panic!("expected Sum, got {other:?}"),
        }
    }

    #[test]
    fn profit_loss_complete_prefers_compte_de_resultat() {
        match resolution(FinancialMetric::ProfitLoss, BilanType::Complete, false) {
            Some(Resolution::Fallback(chain)) => {
                assert_eq!(chain[0], m(M1, "HN"));
                assert_eq!(chain[1], m(M1, "DI"));
            }
            other => panic!("expected Fallback, got {other:?}"),
        }
    }

    #[test]
    fn turnover_simplified_prior_year_has_three_components() {
        match resolution(FinancialMetric::Turnover, BilanType::Simplified, true) {
            Some(Resolution::Sum(components)) => {
                assert_eq!(components.len(), 3);
                assert!(components.iter().all(|cmp| cmp.mapping.field == M2));
            }
            other => panic!("expected Sum, got {other:?}"),
        }
    }

    #[test]
    fn agricultural_schemas_have_no_entries() {
        for metric in ALL_METRICS {
            for bilan_type in [
                BilanType::AgriculturalComplete,
                BilanType::AgriculturalSimplified,
            ] {
                assert_eq!(resolution(metric, bilan_type, false), None);
                assert_eq!(resolution(metric, bilan_type, true), None);
            }
        }
    }

    #[test]
    fn headcount_not_applicable_to_consolidated() {
        assert_eq!(
            resolution(FinancialMetric::Headcount, BilanType::Consolidated, false),
            None
        );
    }
}
