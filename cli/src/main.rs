//! CLI entrypoint for agentix
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod commands;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use agentix_application::MultiAgentOrchestrator;
use agentix_domain::{IntentClassifier, Jurisdiction, WorkflowResult, detect_jurisdiction};
use agentix_infrastructure::{
    ConfigLoader, FileConfig, InMemorySessionStore, LocalDocumentGenerator, StaticKnowledgeBase,
    TracingNotifier,
};

use commands::{Cli, Command, OfferCommand};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };
    config.validate().context("invalid configuration")?;

    let jurisdiction = match &cli.jurisdiction {
        Some(code) => code
            .parse::<Jurisdiction>()
            .map_err(|_| anyhow::anyhow!("unknown jurisdiction: {code} (expected MY or SG)"))?,
        None => config.general.parse_jurisdiction()?,
    };

    info!(jurisdiction = %jurisdiction, "starting agentix");

    // === Dependency Injection ===
    let orchestrator = build_orchestrator(&config);

    let result = match cli.command {
        Command::Query { question, session } => {
            // fall back to detection from the query text when no
            // jurisdiction was given explicitly
            let effective = if cli.jurisdiction.is_some() {
                Some(jurisdiction)
            } else {
                detect_jurisdiction(&question).or(Some(jurisdiction))
            };
            orchestrator
                .process_query(&question, session.as_deref(), effective)
                .await
        }
        Command::Classify { query } => {
            let classification = IntentClassifier::default().classify(&query);
            let detected = detect_jurisdiction(&query);
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "capability": classification.capability,
                    "confidence": classification.confidence,
                    "detected_jurisdiction": detected,
                }))?
            );
            return Ok(());
        }
        Command::Calculate {
            calculation_type,
            salary,
            age,
        } => {
            let mut params = json!({
                "salary": salary,
                "jurisdiction": jurisdiction.as_str(),
            });
            if let Some(age) = age {
                params["age"] = json!(age);
            }
            orchestrator
                .process_calculation(&calculation_type, params, None)
                .await
        }
        Command::Offer { action } => match action {
            OfferCommand::Create {
                name,
                position,
                salary,
                start_date,
                probation_months,
            } => {
                let employee_data = json!({"name": name});
                let mut offer_details = json!({
                    "position": position,
                    "salary": salary,
                    "jurisdiction": jurisdiction.as_str(),
                });
                if let Some(date) = start_date {
                    offer_details["start_date"] = json!(date);
                }
                if let Some(months) = probation_months {
                    offer_details["probation_months"] = json!(months);
                }
                orchestrator
                    .process_onboarding_offer(employee_data, offer_details, None)
                    .await
            }
            OfferCommand::Accept {
                offer_id,
                employee_id,
                signature,
            } => {
                orchestrator
                    .process_offer_acceptance(&offer_id, &employee_id, signature.as_deref(), None)
                    .await
            }
            OfferCommand::Reject {
                offer_id,
                employee_id,
                reason,
            } => {
                orchestrator
                    .process_offer_rejection(&offer_id, &employee_id, reason.as_deref(), None)
                    .await
            }
        },
        Command::Agents => {
            println!(
                "{}",
                serde_json::to_string_pretty(&orchestrator.all_agents_info())?
            );
            return Ok(());
        }
    };

    print_result(&result)?;
    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}

fn build_orchestrator(config: &FileConfig) -> MultiAgentOrchestrator {
    let sessions = Arc::new(InMemorySessionStore::new(
        Duration::from_secs(config.sessions.ttl_seconds),
        config.sessions.max_sessions,
    ));
    let documents = Arc::new(LocalDocumentGenerator::new(
        &config.documents.output_dir,
        config.general.company_name.clone(),
    ));
    let knowledge = Arc::new(StaticKnowledgeBase::new());
    let notifier = Arc::new(TracingNotifier::new(config.notifications.enabled));

    MultiAgentOrchestrator::new(sessions, documents, knowledge, notifier)
}

fn print_result(result: &WorkflowResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}
