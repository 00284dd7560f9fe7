use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use wbx_core::IdMapping;

pub const MAPPING_FILE_NAME: &str = "entity_id_mapping.json";

/// Write `mapping` as a JSON array to `<dir>/entity_id_mapping.json`,
/// creating `dir` if needed.
pub fn write_mapping(dir: &Path, mapping: &[IdMapping]) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let path = dir.join(MAPPING_FILE_NAME);
    let file = std::fs::File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer(&mut writer, mapping)?;
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::debug!(path = %path.display(), entries = mapping.len(), "wrote id mapping");
    Ok(path)
}

/// `source -> target` pairs, comma-separated.
pub fn describe(mapping: &[IdMapping]) -> String {
    mapping
        .iter()
        .map(|pair| format!("{} -> {}", pair.source_id, pair.target_id))
        .collect::<Vec<_>>()
        .join(", ")
}
