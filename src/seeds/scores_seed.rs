use crate::{
    database::{Store, WriteBatch},
    models::{ScoreEntry, ScoreRow},
    utils::error::AppResult,
};
use std::path::Path;

/// Parses the header-driven score CSV. Column order does not matter, unknown
/// columns and extra trailing fields are ignored; a non-numeric score fails
/// the whole file.
pub fn parse_scores(content: &str) -> AppResult<Vec<ScoreEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());
    let mut entries = Vec::new();

    for row in reader.deserialize::<ScoreRow>() {
        entries.push(ScoreEntry::try_from(row?)?);
    }

    Ok(entries)
}

/// Loads leaderboard memberships from `path` in a single pipeline.
/// Returns how many rows were written.
pub async fn load_scores<S: Store + ?Sized>(store: &mut S, path: impl AsRef<Path>) -> AppResult<usize> {
    let path = path.as_ref();
    log::info!("🏆 Loading scores from {}", path.display());

    let content = tokio::fs::read_to_string(path).await?;
    let entries = parse_scores(&content)?;

    let mut batch = WriteBatch::new();
    for entry in &entries {
        batch.push_score(entry);
    }

    store.execute(batch).await?;

    log::info!("✅ Loaded {} scores.", entries.len());
    Ok(entries.len())
}
