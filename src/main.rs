use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use inpi_client::financials::ALL_METRICS;
use inpi_client::{Config, InpiClient, InpiError, Siren, Siret};

/// Fetch company identity, directors and financial metrics from the INPI
/// registry.
#[derive(Parser, Debug)]
#[command(name = "inpi-client", version)]
struct Args {
    /// SIREN (9 digits) or SIRET (14 digits) identifiers to look up
    identifiers: Vec<String>,

    /// File with one SIREN/SIRET per line ('#' lines are skipped)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Also list the company's deeds (actes)
    #[arg(long)]
    actes: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("inpi_client=info")),
        )
        .init();

    let args = Args::parse();

    let mut identifiers = args.identifiers.clone();
    if let Some(path) = &args.file {
        let content = std::fs::read_to_string(path)?;
        identifiers.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string),
        );
    }

    if identifiers.is_empty() {
        anyhow::bail!("no identifiers given; pass SIREN/SIRET values or --file");
    }

    let config = Config::from_env()?;
    let client = InpiClient::login(&config).await?;

    for identifier in &identifiers {
        match resolve_siren(identifier) {
            Ok(siren) => {
                if let Err(e) = report(&client, &siren, args.actes).await {
                    error!(%siren, "lookup failed: {e}");
                }
            }
            Err(e) => error!(%identifier, "skipping: {e}"),
        }
    }

    Ok(())
}

/// Accept either a SIREN or a SIRET (whose first 9 digits are the SIREN).
fn resolve_siren(identifier: &str) -> Result<Siren, InpiError> {
    match Siret::parse(identifier) {
        Ok(siret) => Ok(siret.siren()),
        Err(_) => Siren::parse(identifier),
    }
}

async fn report(client: &InpiClient, siren: &Siren, with_actes: bool) -> Result<(), InpiError> {
    let company = client.company(siren).await?;

    println!("{}", "=".repeat(72));
    println!(
        "{}  —  {}",
        siren,
        company.name().unwrap_or("(no name on record)")
    );
    if let Some(form) = company.legal_form() {
        println!("  legal form: {form}");
    }
    if let Some(ape) = company.ape_code() {
        println!("  APE code:   {ape}");
    }
    if let Some(capital) = company.capital_amount() {
        println!("  capital:    {capital}");
    }
    let address = company.street_address();
    if !address.is_empty() {
        println!("  address:    {}", address.replace('\n', ", "));
    }
    if let (Some(cp), Some(city)) = (company.postal_code(), company.city()) {
        println!("              {cp} {city}");
    }

    let directors = company.directors();
    if !directors.is_empty() {
        println!("  directors:");
        for director in &directors {
            let name = director
                .company_name()
                .map(str::to_string)
                .or_else(|| {
                    Some(format!(
                        "{} {}",
                        director.first_name().unwrap_or_default(),
                        director.last_name().unwrap_or_default()
                    ))
                })
                .unwrap_or_default();
            println!(
                "    - {} ({})",
                name.trim(),
                director.role().unwrap_or("?")
            );
        }
    }

    let attachments = client.attachments(siren).await?;
    for filing in attachments.bilans_saisis() {
        println!(
            "  filing #{} [{}] closed {}:",
            filing.position,
            filing.type_bilan.as_deref().unwrap_or("?"),
            filing
                .date_cloture
                .map(|d| d.to_string())
                .unwrap_or_else(|| "?".to_string()),
        );
        for metric in ALL_METRICS {
            let current = attachments.metric(filing.position, metric, false);
            let prior = attachments.metric(filing.position, metric, true);
            if current.is_some() || prior.is_some() {
                println!(
                    "      {:<24} N: {:<12} N-1: {}",
                    metric.label(),
                    current.map(|v| v.to_string()).unwrap_or_else(|| "-".into()),
                    prior.map(|v| v.to_string()).unwrap_or_else(|| "-".into()),
                );
            }
        }
    }

    if with_actes {
        for acte in attachments.actes() {
            println!(
                "  acte #{} [{}] deposited {}",
                acte.position,
                acte.type_rdd.as_deref().unwrap_or("?"),
                acte.date_depot
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "?".to_string()),
            );
        }
    }

    Ok(())
}
