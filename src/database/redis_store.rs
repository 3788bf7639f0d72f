use super::{Store, Write, WriteBatch};
use crate::{
    models::{IndexSchema, SearchDocument, UserSearch},
    utils::error::{AppError, AppResult},
};
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, Cmd, Value};
use std::collections::HashMap;

/// Redis connection (text replies, RESP2)
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Opens the connection and checks it with a PING.
    pub async fn connect(url: &str) -> AppResult<Self> {
        log::info!("🔌 Connecting to Redis at {}", url);

        let client = Client::open(url)?;
        let mut conn = client.get_connection_manager().await?;

        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        log::debug!("PING -> {}", pong);
        log::info!("✅ Connected to Redis.");

        Ok(Self { conn })
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn execute(&mut self, batch: WriteBatch) -> AppResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut pipe = redis::pipe();
        for write in batch.writes() {
            match write {
                Write::Hash { key, fields } => {
                    pipe.hset_multiple(key, fields.as_slice()).ignore();
                }
                Write::RankedMember { key, member, score } => {
                    pipe.zadd(key, member, *score).ignore();
                }
            }
        }

        log::debug!("📦 Flushing pipeline with {} commands", batch.len());
        let _: () = pipe.query_async(&mut self.conn).await?;
        Ok(())
    }

    async fn hash_get_all(&mut self, key: &str) -> AppResult<HashMap<String, String>> {
        let map: HashMap<String, String> = self.conn.hgetall(key).await?;
        Ok(map)
    }

    async fn hash_get(&mut self, key: &str, field: &str) -> AppResult<Option<String>> {
        let value: Option<String> = self.conn.hget(key, field).await?;
        Ok(value)
    }

    async fn hash_get_fields(&mut self, key: &str, fields: &[&str]) -> AppResult<Vec<Option<String>>> {
        let values: Vec<Option<String>> = redis::cmd("HMGET")
            .arg(key)
            .arg(fields)
            .query_async(&mut self.conn)
            .await?;
        Ok(values)
    }

    async fn scan_page(&mut self, cursor: u64, pattern: &str, count: usize) -> AppResult<(u64, Vec<String>)> {
        let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(pattern)
            .arg("COUNT")
            .arg(count)
            .query_async(&mut self.conn)
            .await?;
        Ok((next, keys))
    }

    async fn create_index(&mut self, schema: &IndexSchema) -> AppResult<()> {
        let _: () = create_index_cmd(schema).query_async(&mut self.conn).await?;
        Ok(())
    }

    async fn search(&mut self, index: &str, query: &UserSearch) -> AppResult<Vec<SearchDocument>> {
        let reply: Vec<Value> = search_cmd(index, query).query_async(&mut self.conn).await?;
        parse_search_reply(&reply)
    }

    async fn top_members(&mut self, key: &str, count: usize) -> AppResult<Vec<(String, f64)>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let members: Vec<(String, f64)> = self
            .conn
            .zrevrange_withscores(key, 0, last_rank(count))
            .await?;
        Ok(members)
    }
}

/// `FT.CREATE <name> ON HASH PREFIX 1 <prefix> SCHEMA <field> <kind> ...`
fn create_index_cmd(schema: &IndexSchema) -> Cmd {
    let mut cmd = redis::cmd("FT.CREATE");
    cmd.arg(&schema.name)
        .arg("ON")
        .arg("HASH")
        .arg("PREFIX")
        .arg(1)
        .arg(&schema.prefix)
        .arg("SCHEMA");
    for (name, kind) in &schema.fields {
        cmd.arg(*name).arg(kind.as_str());
    }
    cmd
}

/// `FT.SEARCH <index> <query> LIMIT 0 <limit>`
fn search_cmd(index: &str, query: &UserSearch) -> Cmd {
    let mut cmd = redis::cmd("FT.SEARCH");
    cmd.arg(index)
        .arg(query.to_query())
        .arg("LIMIT")
        .arg(0)
        .arg(query.limit);
    cmd
}

/// Stop index for a ZREVRANGE returning `count` members (`count` > 0).
fn last_rank(count: usize) -> isize {
    isize::try_from(count).unwrap_or(isize::MAX) - 1
}

/// Decodes an FT.SEARCH reply: `[total, key, [field, value, ...], key, ...]`.
fn parse_search_reply(reply: &[Value]) -> AppResult<Vec<SearchDocument>> {
    let (total, rest) = reply
        .split_first()
        .ok_or_else(|| AppError::UnexpectedReply("empty FT.SEARCH reply".to_string()))?;

    let total: i64 = redis::from_redis_value(total)?;
    log::debug!("🔎 FT.SEARCH matched {} documents", total);

    rest.chunks(2)
        .map(|pair| -> AppResult<SearchDocument> {
            match pair {
                [id, fields] => {
                    let id: String = redis::from_redis_value(id)?;
                    let flat: Vec<String> = redis::from_redis_value(fields)?;
                    let fields = flat
                        .chunks(2)
                        .filter_map(|kv| match kv {
                            [k, v] => Some((k.clone(), v.clone())),
                            _ => None,
                        })
                        .collect();
                    Ok(SearchDocument { id, fields })
                }
                _ => Err(AppError::UnexpectedReply(
                    "FT.SEARCH document without fields".to_string(),
                )),
            }
        })
        .collect()
}
