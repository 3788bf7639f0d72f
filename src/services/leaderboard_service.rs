// ==================== LEADERBOARD ====================

use crate::{
    database::Store,
    models::{leaderboard_key, user_key, LeaderboardEmail},
    utils::error::AppResult,
};

/// Query 5: emails of the `top` best scored members of `leaderboard:<board>`,
/// best first. Members whose user hash has no email are skipped.
pub async fn top_emails<S: Store + ?Sized>(store: &mut S, board: &str, top: usize) -> AppResult<Vec<LeaderboardEmail>> {
    let members = store.top_members(&leaderboard_key(board), top).await?;
    let mut result = Vec::with_capacity(members.len());

    for (member, score) in members {
        match store.hash_get(&user_key(&member), "email").await? {
            Some(email) if !email.is_empty() => result.push(LeaderboardEmail { member, email, score }),
            _ => log::debug!("No email for leaderboard member {}", member),
        }
    }

    Ok(result)
}
