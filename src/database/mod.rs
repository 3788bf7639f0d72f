//! Store seam used by the loaders and queries.
//!
//! Every operation receives the store handle explicitly. `RedisStore` talks to
//! a live server, `Disconnected` stands in when the connection could not be
//! opened so that each step fails on its own.

mod redis_store;

#[cfg(test)]
pub mod memory;

pub use redis_store::RedisStore;

use crate::{
    models::{IndexSchema, ScoreEntry, SearchDocument, UserRecord, UserSearch},
    utils::error::{AppError, AppResult},
};
use async_trait::async_trait;
use std::collections::HashMap;

/// A single queued write
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    Hash {
        key: String,
        fields: Vec<(String, String)>,
    },
    RankedMember {
        key: String,
        member: String,
        score: f64,
    },
}

/// Writes sent to the store in one round trip
#[derive(Debug, Default, Clone)]
pub struct WriteBatch {
    writes: Vec<Write>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, record: &UserRecord) {
        self.writes.push(Write::Hash {
            key: record.key.clone(),
            fields: record
                .fields
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        });
    }

    pub fn push_score(&mut self, entry: &ScoreEntry) {
        self.writes.push(Write::RankedMember {
            key: entry.board_key.clone(),
            member: entry.member.clone(),
            score: entry.score,
        });
    }

    pub fn writes(&self) -> &[Write] {
        &self.writes
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

#[async_trait]
pub trait Store: Send {
    /// Applies a whole batch in one pipelined round trip.
    async fn execute(&mut self, batch: WriteBatch) -> AppResult<()>;

    /// Every field of a hash; empty when the key does not exist.
    async fn hash_get_all(&mut self, key: &str) -> AppResult<HashMap<String, String>>;

    async fn hash_get(&mut self, key: &str, field: &str) -> AppResult<Option<String>>;

    /// Values of the given fields, in order, `None` for missing ones.
    async fn hash_get_fields(&mut self, key: &str, fields: &[&str]) -> AppResult<Vec<Option<String>>>;

    /// One SCAN step: returns the next cursor (0 when done) and the page of keys.
    async fn scan_page(&mut self, cursor: u64, pattern: &str, count: usize) -> AppResult<(u64, Vec<String>)>;

    async fn create_index(&mut self, schema: &IndexSchema) -> AppResult<()>;

    async fn search(&mut self, index: &str, query: &UserSearch) -> AppResult<Vec<SearchDocument>>;

    /// Highest scored members of a ranked set, best first.
    async fn top_members(&mut self, key: &str, count: usize) -> AppResult<Vec<(String, f64)>>;
}

/// Placeholder used after a failed connect; every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct Disconnected;

#[async_trait]
impl Store for Disconnected {
    async fn execute(&mut self, _batch: WriteBatch) -> AppResult<()> {
        Err(AppError::NotConnected)
    }

    async fn hash_get_all(&mut self, _key: &str) -> AppResult<HashMap<String, String>> {
        Err(AppError::NotConnected)
    }

    async fn hash_get(&mut self, _key: &str, _field: &str) -> AppResult<Option<String>> {
        Err(AppError::NotConnected)
    }

    async fn hash_get_fields(&mut self, _key: &str, _fields: &[&str]) -> AppResult<Vec<Option<String>>> {
        Err(AppError::NotConnected)
    }

    async fn scan_page(&mut self, _cursor: u64, _pattern: &str, _count: usize) -> AppResult<(u64, Vec<String>)> {
        Err(AppError::NotConnected)
    }

    async fn create_index(&mut self, _schema: &IndexSchema) -> AppResult<()> {
        Err(AppError::NotConnected)
    }

    async fn search(&mut self, _index: &str, _query: &UserSearch) -> AppResult<Vec<SearchDocument>> {
        Err(AppError::NotConnected)
    }

    async fn top_members(&mut self, _key: &str, _count: usize) -> AppResult<Vec<(String, f64)>> {
        Err(AppError::NotConnected)
    }
}
