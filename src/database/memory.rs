//! In-memory `Store` used by the unit tests.

use super::{Store, Write, WriteBatch};
use crate::{
    models::{IndexSchema, SearchDocument, UserSearch},
    utils::error::AppResult,
};
use async_trait::async_trait;
use redis::{ErrorKind, RedisError};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub hashes: BTreeMap<String, HashMap<String, String>>,
    pub ranked: HashMap<String, Vec<(String, f64)>>,
    pub indexes: HashMap<String, IndexSchema>,
    /// Makes the next `execute` fail without applying anything.
    pub fail_writes: bool,
    pub scan_calls: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_hash(&mut self, key: &str, fields: &[(&str, &str)]) {
        let entry = self.hashes.entry(key.to_string()).or_default();
        for (k, v) in fields {
            entry.insert(k.to_string(), v.to_string());
        }
    }

    pub fn score_of(&self, key: &str, member: &str) -> Option<f64> {
        self.ranked
            .get(key)?
            .iter()
            .find(|(m, _)| m == member)
            .map(|(_, s)| *s)
    }

    fn zadd(&mut self, key: &str, member: &str, score: f64) {
        let set = self.ranked.entry(key.to_string()).or_default();
        match set.iter_mut().find(|(m, _)| m == member) {
            Some(existing) => existing.1 = score,
            None => set.push((member.to_string(), score)),
        }
    }
}

fn pattern_matches(pattern: &str, key: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => key.starts_with(prefix),
        None => key == pattern,
    }
}

/// Evaluates the compound user filter against a hash, the way the index would.
fn search_matches(query: &UserSearch, fields: &HashMap<String, String>) -> bool {
    let gender_ok = fields.get("gender").map(|g| g == &query.gender).unwrap_or(false);
    let country_ok = fields
        .get("country")
        .map(|c| query.countries.iter().any(|wanted| wanted == c))
        .unwrap_or(false);
    let latitude_ok = fields
        .get("latitude")
        .and_then(|l| l.parse::<f64>().ok())
        .map(|l| l >= query.latitude.0 && l <= query.latitude.1)
        .unwrap_or(false);

    gender_ok && country_ok && latitude_ok
}

fn response_error(message: &'static str) -> RedisError {
    RedisError::from((ErrorKind::ResponseError, message))
}

#[async_trait]
impl Store for MemoryStore {
    async fn execute(&mut self, batch: WriteBatch) -> AppResult<()> {
        if self.fail_writes {
            return Err(response_error("pipeline rejected").into());
        }

        for write in batch.writes() {
            match write {
                Write::Hash { key, fields } => {
                    let entry = self.hashes.entry(key.clone()).or_default();
                    for (k, v) in fields {
                        entry.insert(k.clone(), v.clone());
                    }
                }
                Write::RankedMember { key, member, score } => self.zadd(key, member, *score),
            }
        }
        Ok(())
    }

    async fn hash_get_all(&mut self, key: &str) -> AppResult<HashMap<String, String>> {
        Ok(self.hashes.get(key).cloned().unwrap_or_default())
    }

    async fn hash_get(&mut self, key: &str, field: &str) -> AppResult<Option<String>> {
        Ok(self.hashes.get(key).and_then(|h| h.get(field)).cloned())
    }

    async fn hash_get_fields(&mut self, key: &str, fields: &[&str]) -> AppResult<Vec<Option<String>>> {
        let hash = self.hashes.get(key);
        Ok(fields
            .iter()
            .map(|f| hash.and_then(|h| h.get(*f)).cloned())
            .collect())
    }

    /// The cursor is an offset into the ordered key space. Like SCAN, a page
    /// may hold fewer matches than `count` (or none).
    async fn scan_page(&mut self, cursor: u64, pattern: &str, count: usize) -> AppResult<(u64, Vec<String>)> {
        self.scan_calls += 1;

        let keys: Vec<&String> = self.hashes.keys().collect();
        let start = cursor as usize;
        if start >= keys.len() {
            return Ok((0, Vec::new()));
        }

        let end = (start + count.max(1)).min(keys.len());
        let page = keys[start..end]
            .iter()
            .filter(|k| pattern_matches(pattern, k))
            .map(|k| k.to_string())
            .collect();
        let next = if end >= keys.len() { 0 } else { end as u64 };

        Ok((next, page))
    }

    async fn create_index(&mut self, schema: &IndexSchema) -> AppResult<()> {
        if self.indexes.contains_key(&schema.name) {
            return Err(response_error("Index already exists").into());
        }
        self.indexes.insert(schema.name.clone(), schema.clone());
        Ok(())
    }

    async fn search(&mut self, index: &str, query: &UserSearch) -> AppResult<Vec<SearchDocument>> {
        let schema = self
            .indexes
            .get(index)
            .ok_or_else(|| response_error("Unknown index name"))?;

        Ok(self
            .hashes
            .iter()
            .filter(|(key, fields)| key.starts_with(&schema.prefix) && search_matches(query, fields))
            .take(query.limit)
            .map(|(key, fields)| SearchDocument {
                id: key.clone(),
                fields: fields.clone(),
            })
            .collect())
    }

    /// Ties are ordered by member, descending, as ZREVRANGE does.
    async fn top_members(&mut self, key: &str, count: usize) -> AppResult<Vec<(String, f64)>> {
        let mut members = self.ranked.get(key).cloned().unwrap_or_default();
        members.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
        members.truncate(count);
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_search_matches_inclusive_latitude_bounds() {
        let search = UserSearch::default();
        assert!(search_matches(&search, &hash(&[("gender", "female"), ("country", "China"), ("latitude", "40")])));
        assert!(search_matches(&search, &hash(&[("gender", "female"), ("country", "Russia"), ("latitude", "46")])));
        assert!(!search_matches(&search, &hash(&[("gender", "female"), ("country", "Russia"), ("latitude", "46.01")])));
    }

    #[test]
    fn test_search_matches_requires_every_clause() {
        let search = UserSearch::default();
        assert!(!search_matches(&search, &hash(&[("gender", "male"), ("country", "China"), ("latitude", "42")])));
        assert!(!search_matches(&search, &hash(&[("gender", "female"), ("country", "Peru"), ("latitude", "42")])));
        assert!(!search_matches(&search, &hash(&[("gender", "female"), ("country", "China")])));
    }
}
