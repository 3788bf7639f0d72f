// ==================== USER SEARCH (RediSearch) ====================

use crate::{
    config::Config,
    database::Store,
    models::{IndexSchema, SearchDocument, UserSearch},
    utils::error::AppResult,
};

/// Creates the user index. Fails when the index already exists.
pub async fn create_index<S: Store + ?Sized>(store: &mut S, index_name: &str) -> AppResult<()> {
    store.create_index(&IndexSchema::users(index_name)).await?;
    log::info!("   ✅ Index created: {}", index_name);
    Ok(())
}

/// Query 4: female users in China or Russia with latitude in [40, 46].
///
/// The index is (re)created on every call; a failure there is expected once
/// the index exists and does not stop the search.
pub async fn search_users<S: Store + ?Sized>(store: &mut S, config: &Config) -> AppResult<Vec<SearchDocument>> {
    if !config.search_enabled {
        log::warn!("⚠️  RediSearch not available.");
        return Ok(Vec::new());
    }

    if let Err(e) = create_index(store, &config.search_index).await {
        log::info!("   ℹ️  Index creation failed: {}", e);
    }

    let query = UserSearch::default();
    log::debug!("🔎 FT.SEARCH {} \"{}\"", config.search_index, query.to_query());

    store.search(&config.search_index, &query).await
}
