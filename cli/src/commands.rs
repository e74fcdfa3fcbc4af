//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for agentix
#[derive(Parser, Debug)]
#[command(name = "agentix")]
#[command(author, version, about = "HR onboarding automation driven by cross-checking specialist agents")]
#[command(long_about = r#"
Agentix routes HR requests to five specialist agents (policy, salary,
training, onboarding, follow-ups) and cross-checks their answers
against each other before reporting back.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./agentix.toml      Project-level config
3. ~/.config/agentix/config.toml   Global config

Example:
  agentix query "how many days of annual leave do I get?"
  agentix calculate epf --salary 4000
  agentix offer create --name "Aisha Rahman" --position "Engineer" --salary 4000
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Jurisdiction to assume (MY or SG); overrides the configured default
    #[arg(short, long, value_name = "CODE", global = true)]
    pub jurisdiction: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Route a free-text HR question to the right agent
    Query {
        /// The question to ask
        question: String,

        /// Session id for request-scoped shared context
        #[arg(long, value_name = "ID")]
        session: Option<String>,
    },

    /// Show which capability a query would be routed to, without running it
    Classify {
        /// The query to classify
        query: String,
    },

    /// Run a statutory calculation (epf, socso, eis, cpf, sdl, salary_package)
    Calculate {
        /// Calculation type
        calculation_type: String,

        /// Gross monthly salary
        #[arg(long)]
        salary: f64,

        /// Employee age (CPF rates are age-banded)
        #[arg(long)]
        age: Option<u32>,
    },

    /// Manage employment offers
    Offer {
        #[command(subcommand)]
        action: OfferCommand,
    },

    /// List the registered agents and their capabilities
    Agents,
}

#[derive(Subcommand, Debug)]
pub enum OfferCommand {
    /// Create an offer and schedule follow-up reminders
    Create {
        /// Candidate name
        #[arg(long)]
        name: String,

        /// Position offered
        #[arg(long)]
        position: String,

        /// Gross monthly salary offered
        #[arg(long)]
        salary: f64,

        /// Proposed start date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        start_date: Option<String>,

        /// Probation period in months
        #[arg(long)]
        probation_months: Option<u64>,
    },

    /// Accept a pending offer and kick off onboarding
    Accept {
        /// Offer id (OF-...)
        offer_id: String,

        /// Employee id the offer was made to (E-...)
        employee_id: String,

        /// Signature accompanying the acceptance
        #[arg(long)]
        signature: Option<String>,
    },

    /// Reject a pending offer and alert the HR team
    Reject {
        /// Offer id (OF-...)
        offer_id: String,

        /// Employee id the offer was made to (E-...)
        employee_id: String,

        /// Reason given by the candidate
        #[arg(long)]
        reason: Option<String>,
    },
}
