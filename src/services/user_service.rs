// ==================== USER LOOKUPS ====================
// Record fetch, coordinate projection and the even-id scan

use crate::{
    database::Store,
    models::{user_id_from_key, user_key, Coordinates, USER_PREFIX},
    utils::error::AppResult,
};
use serde::Serialize;
use std::collections::HashMap;

const SCAN_PAGE_SIZE: usize = 10;
const EVEN_DIGITS: [char; 5] = ['0', '2', '4', '6', '8'];

/// Keys and last names found by the even-id scan (parallel vectors)
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct EvenIdMatches {
    pub keys: Vec<String>,
    pub last_names: Vec<String>,
}

/// Query 1: every attribute of `user:<id>`, `None` when the user does not exist.
pub async fn get_user<S: Store + ?Sized>(store: &mut S, id: &str) -> AppResult<Option<HashMap<String, String>>> {
    let fields = store.hash_get_all(&user_key(id)).await?;
    Ok(if fields.is_empty() { None } else { Some(fields) })
}

/// Query 2: longitude and latitude, only when both are set.
pub async fn get_coordinates<S: Store + ?Sized>(store: &mut S, id: &str) -> AppResult<Option<Coordinates>> {
    let values = store
        .hash_get_fields(&user_key(id), &["longitude", "latitude"])
        .await?;

    let mut values = values.into_iter();
    let longitude = values.next().flatten().filter(|v| !v.is_empty());
    let latitude = values.next().flatten().filter(|v| !v.is_empty());

    Ok(match (longitude, latitude) {
        (Some(longitude), Some(latitude)) => Some(Coordinates { longitude, latitude }),
        _ => None,
    })
}

/// Query 3: scans `user:*` from `start_cursor` until the cursor comes back to
/// 0 and keeps users whose id starts with an even digit and that have a last
/// name.
pub async fn even_id_last_names<S: Store + ?Sized>(store: &mut S, start_cursor: u64) -> AppResult<EvenIdMatches> {
    let pattern = format!("{}*", USER_PREFIX);
    let mut matches = EvenIdMatches::default();
    let mut cursor = start_cursor;

    loop {
        let (next, keys) = store.scan_page(cursor, &pattern, SCAN_PAGE_SIZE).await?;

        for key in keys {
            let starts_even = user_id_from_key(&key)
                .chars()
                .next()
                .map(|c| EVEN_DIGITS.contains(&c))
                .unwrap_or(false);
            if !starts_even {
                continue;
            }

            if let Some(last_name) = store.hash_get(&key, "last_name").await? {
                if !last_name.is_empty() {
                    matches.keys.push(key);
                    matches.last_names.push(last_name);
                }
            }
        }

        if next == 0 {
            break;
        }
        cursor = next;
    }

    log::debug!("🔢 Even-id scan kept {} users", matches.keys.len());
    Ok(matches)
}
