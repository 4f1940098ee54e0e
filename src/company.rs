//! Read-only projections over a fetched company record.
//!
//! The `companies/{siren}` payload nests company identity under one of
//! several records depending on the legal setup (personneMorale for legal
//! entities, personnePhysique for sole proprietorships, exploitation for
//! farm operations). Accessors try the alternatives in a fixed priority
//! order and return the first present value; every miss is `None`.

use serde_json::Value;

use crate::json::{first_str, nested, nested_i64, nested_str};

/// A fetched company record.
#[derive(Debug, Clone)]
pub struct Company {
    raw: Value,
}

impl Company {
    pub fn new(raw: Value) -> Self {
        Company { raw }
    }

    /// The full JSON payload as returned by the API.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_inner(self) -> Value {
        self.raw
    }

    /// Company name, from the legal-entity record, then the farm-operation
    /// record, then the sole-proprietorship record.
    pub fn name(&self) -> Option<&str> {
        first_str(
            &self.raw,
            &[
                "/formality/content/personneMorale/identite/entreprise/denomination",
                "/formality/content/exploitation/identite/entreprise/denomination",
                "/formality/content/personnePhysique/identite/entreprise/denomination",
            ],
        )
    }

    pub fn legal_form(&self) -> Option<&str> {
        first_str(
            &self.raw,
            &[
                "/formality/formeJuridique",
                "/formality/content/natureCreation/formeJuridique",
                "/formality/content/personneMorale/identite/entreprise/formeJuridique",
                "/formality/content/personnePhysique/identite/entreprise/formeJuridique",
            ],
        )
    }

    pub fn ape_code(&self) -> Option<&str> {
        first_str(
            &self.raw,
            &[
                "/formality/content/personneMorale/identite/entreprise/codeApe",
                "/formality/content/exploitation/identite/entreprise/codeApe",
            ],
        )
    }

    /// Registered capital, in the filing's currency.
    pub fn capital_amount(&self) -> Option<i64> {
        nested_i64(
            &self.raw,
            "/formality/content/personneMorale/identite/description/montantCapital",
        )
    }

    pub fn trade_name(&self) -> Option<String> {
        if let Some(name) = first_str(
            &self.raw,
            &[
                "/formality/content/personneMorale/etablissementPrincipal/descriptionEtablissement/nomCommercial",
                "/formality/content/personneMorale/identite/entreprise/nomCommercial",
            ],
        ) {
            return Some(name.to_string());
        }

        // Secondary establishments may each carry their own trade name.
        let names: Vec<&str> = nested(&self.raw, "/formality/content/personneMorale/autresEtablissements")?
            .as_array()?
            .iter()
            .filter_map(|etab| nested_str(etab, "/descriptionEtablissement/nomCommercial"))
            .collect();

        if names.is_empty() {
            None
        } else {
            Some(names.join(", "))
        }
    }

    pub fn head_office_siret(&self) -> Option<&str> {
        nested_str(
            &self.raw,
            "/formality/content/personneMorale/etablissementPrincipal/descriptionEtablissement/siret",
        )
    }

    pub fn postal_code(&self) -> Option<&str> {
        nested_str(
            &self.raw,
            "/formality/content/personneMorale/etablissementPrincipal/adresse/codePostal",
        )
    }

    pub fn city(&self) -> Option<&str> {
        nested_str(
            &self.raw,
            "/formality/content/personneMorale/etablissementPrincipal/adresse/commune",
        )
    }

    pub fn country(&self) -> Option<&str> {
        first_str(
            &self.raw,
            &[
                "/formality/content/personneMorale/etablissementPrincipal/adresse/pays",
                "/formality/content/exploitation/etablissementPrincipal/adresse/pays",
                "/formality/content/personneMorale/adresseEntreprise/adresse/pays",
            ],
        )
    }

    pub fn country_code(&self) -> Option<&str> {
        first_str(
            &self.raw,
            &[
                "/formality/content/personneMorale/etablissementPrincipal/adresse/codePays",
                "/formality/content/exploitation/etablissementPrincipal/adresse/codePays",
                "/formality/content/personneMorale/adresseEntreprise/adresse/codePays",
            ],
        )
    }

    /// Street address assembled from the head-office address parts.
    pub fn street_address(&self) -> String {
        let base = match nested(&self.raw, "/formality/content/personneMorale/etablissementPrincipal/adresse") {
            Some(v) => v,
            None => return String::new(),
        };
        let part = |key: &str| base.get(key).and_then(Value::as_str).unwrap_or("");

        let mut lines = Vec::new();

        let complement = part("complementLocalisation");
        if !complement.is_empty() {
            lines.push(complement.to_string());
        }

        let street = format!(
            "{} {} {}",
            part("numVoie"),
            part("typeVoie"),
            part("voie")
        );
        let street = street.split_whitespace().collect::<Vec<_>>().join(" ");
        if !street.is_empty() {
            lines.push(street);
        }

        let distribution = part("distributionSpeciale");
        if !distribution.is_empty() {
            lines.push(distribution.to_string());
        }

        lines.join("\n")
    }

    /// Detailed business description, trimmed.
    pub fn description(&self) -> Option<String> {
        first_str(
            &self.raw,
            &[
                "/formality/content/personneMorale/identite/description/objet",
                "/formality/content/personneMorale/etablissementPrincipal/activites/0/descriptionDetaillee",
                "/formality/content/personneMorale/autresEtablissements/0/activites/0/descriptionDetaillee",
            ],
        )
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    }

    pub fn cessation_nature(&self) -> Option<&str> {
        nested_str(&self.raw, "/formality/content/natureCessation")
    }

    pub fn cessation_date(&self) -> Option<&str> {
        nested_str(
            &self.raw,
            "/formality/content/personneMorale/detailCessationEntreprise/dateRadiation",
        )
    }

    pub fn cessation_effective_date(&self) -> Option<&str> {
        nested_str(
            &self.raw,
            "/formality/content/personneMorale/detailCessationEntreprise/dateEffet",
        )
    }

    /// Officers and corporate directors ("pouvoirs").
    pub fn directors(&self) -> Vec<Director<'_>> {
        nested(&self.raw, "/formality/content/personneMorale/composition/pouvoirs")
            .and_then(Value::as_array)
            .map(|pouvoirs| pouvoirs.iter().map(Director::new).collect())
            .unwrap_or_default()
    }
}

/// Whether a director entry is a person or a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorKind {
    Individual,
    Corporate,
}

/// A view over one entry of the `pouvoirs` array.
#[derive(Debug, Clone, Copy)]
pub struct Director<'a> {
    raw: &'a Value,
}

impl<'a> Director<'a> {
    fn new(raw: &'a Value) -> Self {
        Director { raw }
    }

    pub fn raw(&self) -> &'a Value {
        self.raw
    }

    pub fn kind(&self) -> Option<DirectorKind> {
        match nested_str(self.raw, "/typeDePersonne")? {
            "INDIVIDU" => Some(DirectorKind::Individual),
            "ENTREPRISE" => Some(DirectorKind::Corporate),
            _ => None,
        }
    }

    pub fn last_name(&self) -> Option<&'a str> {
        nested_str(self.raw, "/individu/descriptionPersonne/nom")
    }

    pub fn first_names(&self) -> Vec<&'a str> {
        nested(self.raw, "/individu/descriptionPersonne/prenoms")
            .and_then(Value::as_array)
            .map(|prenoms| prenoms.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// All first names joined with spaces, `None` when the record has no
    /// prenoms list at all.
    pub fn first_name(&self) -> Option<String> {
        nested(self.raw, "/individu/descriptionPersonne/prenoms")?;
        Some(self.first_names().join(" "))
    }

    pub fn birth_date(&self) -> Option<&'a str> {
        nested_str(self.raw, "/individu/descriptionPersonne/dateDeNaissance")
    }

    pub fn nationality(&self) -> Option<&'a str> {
        nested_str(self.raw, "/individu/descriptionPersonne/nationalite")
    }

    pub fn gender(&self) -> Option<&'a str> {
        nested_str(self.raw, "/individu/descriptionPersonne/genre")
    }

    pub fn marital_status(&self) -> Option<&'a str> {
        nested_str(self.raw, "/individu/descriptionPersonne/situationMatrimoniale")
    }

    /// Role code, preferring the person record over the entry-level code.
    pub fn role(&self) -> Option<&'a str> {
        first_str(
            self.raw,
            &["/individu/descriptionPersonne/role", "/roleEntreprise"],
        )
    }

    pub fn secondary_role(&self) -> Option<&'a str> {
        nested_str(self.raw, "/secondRoleEntreprise")
    }

    pub fn active(&self) -> Option<bool> {
        nested(self.raw, "/actif").and_then(Value::as_bool)
    }

    pub fn resignation_noted(&self) -> Option<bool> {
        nested(self.raw, "/mentionDemissionOrdre").and_then(Value::as_bool)
    }

    pub fn home_city(&self) -> Option<&'a str> {
        nested_str(self.raw, "/individu/adresseDomicile/commune")
    }

    pub fn home_postal_code(&self) -> Option<&'a str> {
        nested_str(self.raw, "/individu/adresseDomicile/codePostal")
    }

    pub fn home_country(&self) -> Option<&'a str> {
        nested_str(self.raw, "/individu/adresseDomicile/pays")
    }

    pub fn home_country_code(&self) -> Option<&'a str> {
        nested_str(self.raw, "/individu/adresseDomicile/codePays")
    }

    /// For corporate directors: the company's name.
    pub fn company_name(&self) -> Option<&'a str> {
        nested_str(self.raw, "/entreprise/denomination")
    }

    /// For corporate directors: the company's SIREN.
    pub fn company_siren(&self) -> Option<&'a str> {
        nested_str(self.raw, "/entreprise/siren")
    }

    /// For corporate directors: the company's role code.
    pub fn company_role(&self) -> Option<&'a str> {
        nested_str(self.raw, "/entreprise/roleEntreprise")
    }
}
