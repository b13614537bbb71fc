//! Interactive budget allocation session.
//!
//! Collects categories and constraints from the terminal, then drives the
//! solver and audit logger. The core crates never touch the terminal; all
//! prompting and rendering lives here.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use apportion_config::BudgetConfig;

mod input;
mod session;

/// Allocate a budget across categories from user-stated constraints.
#[derive(Debug, Parser)]
#[command(name = "apportion", version, about)]
struct Args {
    /// Configuration file (TOML). Defaults apply when the file is missing.
    #[arg(long, default_value = "apportion.toml")]
    config: PathBuf,

    /// Override the audit log directory from the configuration.
    #[arg(long)]
    audit_dir: Option<PathBuf>,
}

/// Default log directives when `RUST_LOG` is unset. Both crates that emit
/// events are listed; the solver traces the pipeline, the session reports
/// audit writes.
const DEFAULT_LOG_DIRECTIVES: &str = "apportion_solver=info,apportion_cli=info";

fn log_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();

    let mut config = BudgetConfig::load(&args.config).unwrap_or_default();
    if let Some(dir) = args.audit_dir {
        config.audit_dir = dir;
    }

    session::run(&config)
}
