use anyhow::{Context, Result};
use tracing::info;

use intuition_core::model::TrustSignalsData;
use intuition_core::TrustReport;
use intuition_query::{IntuitionClient, Operation};

use crate::output::format::format_trust_report;
use crate::output::OutputFormat;

pub fn run(client: &IntuitionClient, atom_id: u64, format: OutputFormat) -> Result<()> {
    let response = client
        .run(&Operation::TrustSignals { atom_id })
        .with_context(|| format!("Failed to fetch trust signals for atom {atom_id}"))?;

    let data: TrustSignalsData = response
        .data()
        .with_context(|| format!("Unexpected trust signal response for atom {atom_id}"))?;
    let report = TrustReport::build(atom_id.to_string(), &data);
    info!(atom_id, band = %report.metrics.assessment, "trust score computed");

    let output = format_trust_report(&report, format)?;
    println!("{output}");
    Ok(())
}
