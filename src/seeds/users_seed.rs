use crate::{
    database::{Store, WriteBatch},
    models::UserRecord,
    utils::{error::AppResult, tokenizer::tokenize_line},
};
use std::path::Path;

/// Parses a users file. Lines that do not yield a full record are skipped.
pub fn parse_users(content: &str) -> Vec<UserRecord> {
    content
        .trim()
        .split('\n')
        .filter_map(|line| UserRecord::from_tokens(&tokenize_line(line)))
        .collect()
}

/// Loads every user record from `path` into hashes in a single pipeline.
/// Returns how many records were written.
pub async fn load_users<S: Store + ?Sized>(store: &mut S, path: impl AsRef<Path>) -> AppResult<usize> {
    let path = path.as_ref();
    log::info!("👤 Loading users from {}", path.display());

    let content = tokio::fs::read_to_string(path).await?;
    let records = parse_users(&content);

    let mut batch = WriteBatch::new();
    for record in &records {
        batch.push_user(record);
    }

    store.execute(batch).await?;

    log::info!("✅ Loaded {} users.", records.len());
    Ok(records.len())
}
