use chrono::NaiveDate;

/// Configuration for the client.
#[derive(Debug, Clone)]
pub struct Config {
    pub username: String,
    pub password: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

pub const DEFAULT_BASE_URL: &str = "https://registre-national-entreprises.inpi.fr/api";

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Ok(Config {
            username: std::env::var("INPI_USERNAME")
                .map_err(|_| anyhow::anyhow!("INPI_USERNAME environment variable required"))?,
            password: std::env::var("INPI_PASSWORD")
                .map_err(|_| anyhow::anyhow!("INPI_PASSWORD environment variable required"))?,
            base_url: std::env::var("INPI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout_secs: std::env::var("INPI_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
        })
    }

    /// Build a configuration with explicit credentials and default endpoint.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Config {
            username: username.into(),
            password: password.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// One PDF bilan listed in a company's attachments.
#[derive(Debug, Clone, PartialEq)]
pub struct BilanPdfSummary {
    pub position: usize,
    pub id: Option<String>,
    pub date_cloture: Option<NaiveDate>,
}

/// One structured filing ("bilan saisi") listed in a company's attachments.
#[derive(Debug, Clone, PartialEq)]
pub struct BilanSaisiSummary {
    pub position: usize,
    pub id: Option<String>,
    pub date_cloture: Option<NaiveDate>,
    pub date_depot: Option<NaiveDate>,
    pub type_bilan: Option<String>,
    pub confidentiality: Option<String>,
    pub num_chrono: Option<String>,
    pub updated_at: Option<String>,
}

/// One deed ("acte") listed in a company's attachments.
#[derive(Debug, Clone, PartialEq)]
pub struct ActeSummary {
    pub position: usize,
    pub id: Option<String>,
    pub date_depot: Option<NaiveDate>,
    pub type_rdd: Option<String>,
}
