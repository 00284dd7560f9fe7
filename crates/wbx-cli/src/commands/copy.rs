use std::path::PathBuf;

use serde::Serialize;
use wbx_config::WbxConfig;
use wbx_core::IdMapping;
use wbx_transfer::{CopyRequest, ItemFailure, TransferEngine, TransferError};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::CopyArgs;
use crate::commands::shared::{lines, mapping, policy};
use crate::output::output;

#[derive(Debug, Serialize)]
struct CopyResponse {
    mapping_file: PathBuf,
    created: usize,
    failed: usize,
    mapping: Vec<IdMapping>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failures: Vec<ItemFailure>,
}

/// Handle `wbx copy`.
pub async fn handle(args: &CopyArgs, flags: &GlobalFlags, config: &WbxConfig) -> anyhow::Result<()> {
    let response = run(args, config).await?;
    output(&response, flags.format)
}

async fn run(args: &CopyArgs, config: &WbxConfig) -> anyhow::Result<CopyResponse> {
    let ids = lines::read_lines(&args.id_file)?;
    let languages = lines::read_lines(&args.language_file)?;
    anyhow::ensure!(
        !ids.is_empty(),
        "{} lists no entity ids",
        args.id_file.display()
    );

    let (session, token) = bootstrap::connect(config).await?;
    let engine = TransferEngine::from_config(&session, &token, &config.transfer)
        .with_policy(policy::resolve(&config.transfer, args.continue_on_error));

    let request = CopyRequest {
        source_url: args
            .source_url
            .clone()
            .unwrap_or_else(|| config.source.api_url.clone()),
        ids,
        languages,
        kind: args.kind,
        equiv_property: args.equiv_property.clone(),
    };

    let report = match engine.copy_entities(&request).await {
        Ok(report) => report,
        Err(error) => return Err(save_partial(args, error)),
    };

    let mapping_file = mapping::write_mapping(&args.output_dir, &report.mapping)?;
    Ok(CopyResponse {
        mapping_file,
        created: report.mapping.len(),
        failed: report.failures.len(),
        mapping: report.mapping,
        failures: report.failures,
    })
}

/// Persist whatever was created before an aborted run so those entities are
/// not orphaned.
fn save_partial(args: &CopyArgs, error: TransferError) -> anyhow::Error {
    if error.completed().is_empty() {
        return error.into();
    }

    match mapping::write_mapping(&args.output_dir, error.completed()) {
        Ok(path) => {
            let note = format!(
                "partial mapping of {} created entities written to {}",
                error.completed().len(),
                path.display()
            );
            anyhow::Error::from(error).context(note)
        }
        Err(write_error) => {
            tracing::warn!(error = %write_error, "failed to write partial id mapping");
            error.into()
        }
    }
}
