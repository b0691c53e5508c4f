use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::error::ScanError;
use crate::license::catalog::Catalog;
use crate::license::classifier::classify;
use crate::models::{Classification, LicenseRecord};
use crate::walker::spawn_walk;

/// Read and classify one file. A read failure yields an `Unknown` record
/// with no metadata instead of an error.
pub async fn classify_file(catalog: &Catalog, path: PathBuf) -> LicenseRecord {
    let classification = match tokio::fs::read(&path).await {
        Ok(contents) => classify(catalog, &contents),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable license file");
            Classification::unknown()
        }
    };
    classification.into_record(path)
}

/// Walk `root` and classify every license file as it is discovered.
///
/// Records are returned in discovery order. `on_record` is called after each
/// one is classified. Nothing is returned unless the walk itself finished
/// cleanly; a traversal error discards everything classified so far.
pub async fn scan<F>(root: &Path, catalog: &Catalog, mut on_record: F) -> Result<Vec<LicenseRecord>>
where
    F: FnMut(&LicenseRecord),
{
    tracing::info!(root = %root.display(), "scanning");

    let (mut rx, walker) = spawn_walk(root);
    let mut records = Vec::new();

    while let Some(path) = rx.recv().await {
        let record = classify_file(catalog, path).await;
        on_record(&record);
        records.push(record);
    }

    // The channel is closed; wait for the walker's verdict before reporting.
    walker.await.map_err(ScanError::from)??;

    tracing::info!(files = records.len(), "scan complete");
    Ok(records)
}

/// Order records by source path, for output that does not depend on
/// filesystem enumeration order.
pub fn sort_by_path(records: &mut [LicenseRecord]) {
    records.sort_by(|a, b| a.source_path.cmp(&b.source_path));
}
