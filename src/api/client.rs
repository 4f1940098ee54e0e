use std::path::Path;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::auth;
use crate::attachments::Attachments;
use crate::company::Company;
use crate::error::InpiError;
use crate::models::Config;
use crate::validators::Siren;

const USER_AGENT: &str = concat!("inpi-client/", env!("CARGO_PKG_VERSION"));

/// Authenticated client for the INPI registry API.
#[derive(Debug)]
pub struct InpiClient {
    http: Client,
    base_url: String,
    token: String,
}

impl InpiClient {
    /// Authenticate and build a client.
    ///
    /// The token is fetched once and reused for the client's lifetime;
    /// there is no refresh-on-expiry.
    pub async fn login(config: &Config) -> Result<Self, InpiError> {
        // Validate the endpoint up front so a bad base URL fails at login
        // rather than on the first fetch.
        Url::parse(&config.base_url)
            .map_err(|e| InpiError::Authentication(format!("invalid base URL: {e}")))?;
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        let token = auth::fetch_token(&http, &base_url, &config.username, &config.password).await?;

        Ok(InpiClient {
            http,
            base_url,
            token,
        })
    }

    /// Authenticated JSON GET against the API. Single attempt.
    pub async fn get_json(&self, endpoint: &str) -> Result<Value, InpiError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(InpiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        // A non-JSON body on a 2xx is still a transport-level defect; keep
        // the raw text for diagnostics.
        serde_json::from_str(&body).map_err(|_| InpiError::Api {
            status: status.as_u16(),
            body,
        })
    }

    /// Fetch the company record for a SIREN.
    pub async fn company(&self, siren: &Siren) -> Result<Company, InpiError> {
        let raw = self.get_json(&format!("companies/{siren}")).await?;
        Ok(Company::new(raw))
    }

    /// Fetch the attachments (bilans, bilans saisis, actes) for a SIREN.
    pub async fn attachments(&self, siren: &Siren) -> Result<Attachments, InpiError> {
        let raw = self
            .get_json(&format!("companies/{siren}/attachments"))
            .await?;
        Ok(Attachments::new(raw))
    }

    /// Fetch one structured filing by its identifier.
    pub async fn bilan_saisi(&self, id: &str) -> Result<Value, InpiError> {
        self.get_json(&format!("bilans-saisis/{id}")).await
    }

    /// Fetch the metadata of one PDF bilan by its identifier.
    pub async fn bilan_pdf_metadata(&self, id: &str) -> Result<Value, InpiError> {
        self.get_json(&format!("bilans/{id}")).await
    }

    /// Fetch the metadata of one deed by its identifier.
    pub async fn acte_metadata(&self, id: &str) -> Result<Value, InpiError> {
        self.get_json(&format!("actes/{id}")).await
    }

    /// Download a PDF bilan to `dest`.
    pub async fn download_bilan_pdf(&self, id: &str, dest: &Path) -> Result<(), InpiError> {
        self.download(&format!("bilans/{id}/download"), dest).await
    }

    /// Download a deed PDF to `dest`.
    pub async fn download_acte_pdf(&self, id: &str, dest: &Path) -> Result<(), InpiError> {
        self.download(&format!("actes/{id}/download"), dest).await
    }

    async fn download(&self, endpoint: &str, dest: &Path) -> Result<(), InpiError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, dest = %dest.display(), "downloading");

        let response = self.http.get(&url).bearer_auth(&self.token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InpiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        tokio::fs::write(dest, &bytes).await?;
        Ok(())
    }
}
