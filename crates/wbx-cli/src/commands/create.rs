use serde::Serialize;
use wbx_config::WbxConfig;
use wbx_core::IdMapping;
use wbx_transfer::{ItemFailure, TransferEngine, TransferError};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::CreateArgs;
use crate::commands::shared::{mapping, policy};
use crate::output::output;

#[derive(Debug, Serialize)]
struct CreateResponse {
    created: usize,
    failed: usize,
    mapping: Vec<IdMapping>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failures: Vec<ItemFailure>,
}

/// Handle `wbx create`.
pub async fn handle(args: &CreateArgs, flags: &GlobalFlags, config: &WbxConfig) -> anyhow::Result<()> {
    let response = run(args, config).await?;
    output(&response, flags.format)
}

async fn run(args: &CreateArgs, config: &WbxConfig) -> anyhow::Result<CreateResponse> {
    let records = wbx_transfer::load_tabular_file(&args.csv_file, args.kind)?;

    let (session, token) = bootstrap::connect(config).await?;
    let report = match TransferEngine::from_config(&session, &token, &config.transfer)
        .with_policy(policy::resolve(&config.transfer, args.continue_on_error))
        .create_entities(&records, &args.language, args.kind)
        .await
    {
        Ok(report) => report,
        Err(error) => return Err(report_completed(error)),
    };

    Ok(CreateResponse {
        created: report.mapping.len(),
        failed: report.failures.len(),
        mapping: report.mapping,
        failures: report.failures,
    })
}

/// Name the entities that already exist on the target when a run stops.
fn report_completed(error: TransferError) -> anyhow::Error {
    if error.completed().is_empty() {
        return error.into();
    }
    let note = format!(
        "entities created before the failure: {}",
        mapping::describe(error.completed())
    );
    anyhow::Error::from(error).context(note)
}
