//! Quota command - check or consume usage service counters.

use console::style;
use serde::Serialize;
use streetframe::provider::ReqwestClient;
use streetframe::quota::{QuotaClient, QuotaKind, QuotaStatus};

use super::common::{print_json, QuotaKindArg};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the quota command.
pub struct QuotaArgs {
    /// Counter to act on; all counters when absent.
    pub kind: Option<QuotaKindArg>,
    pub host: Option<String>,
    pub decrement: bool,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct QuotaReport {
    kind: String,
    #[serde(flatten)]
    status: QuotaStatus,
}

/// Run the quota command.
pub fn run(runner: &CliRunner, args: QuotaArgs) -> Result<(), CliError> {
    runner.log_startup("quota");
    let config = runner.config();

    let host = args
        .host
        .or_else(|| config.provider.quota_host.clone())
        .ok_or_else(|| {
            CliError::Config(
                "No quota host configured. Set quota_host in config.ini or use --host"
                    .to_string(),
            )
        })?;
    let client = QuotaClient::new(ReqwestClient::new()?, host)?;

    let kinds: Vec<QuotaKind> = match args.kind {
        Some(kind) => vec![kind.into()],
        None => QuotaKind::ALL.to_vec(),
    };

    if args.decrement {
        let [kind] = kinds.as_slice() else {
            return Err(CliError::Config(
                "Choose one counter to decrement".to_string(),
            ));
        };
        client.decrement(*kind)?;
        if !args.json {
            println!("Decremented {}", kind);
        }
    }

    let reports: Vec<QuotaReport> = kinds
        .into_iter()
        .map(|kind| QuotaReport {
            kind: kind.to_string(),
            status: client.check(kind),
        })
        .collect();

    if args.json {
        return print_json(&reports);
    }

    for report in &reports {
        let status = &report.status;
        let label = if status.exceeded {
            style("exceeded").red().bold()
        } else if status.almost_exceeded {
            style("almost exceeded").yellow()
        } else {
            style("ok").green()
        };
        println!("  {:<16} {:>8}  {}", report.kind, status.remaining, label);
    }

    Ok(())
}
