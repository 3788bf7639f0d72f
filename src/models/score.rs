use crate::utils::error::AppError;
use serde::{Deserialize, Serialize};

pub const LEADERBOARD_PREFIX: &str = "leaderboard:";

pub fn leaderboard_key(name: &str) -> String {
    format!("{}{}", LEADERBOARD_PREFIX, name)
}

/// One row of the score file (`user:id,score,leaderboard`)
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreRow {
    #[serde(rename = "user:id")]
    pub user_id: String,
    pub score: String,
    pub leaderboard: String,
}

/// Ranked set membership queued for writing
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub board_key: String,
    pub member: String,
    pub score: f64,
}

impl TryFrom<ScoreRow> for ScoreEntry {
    type Error = AppError;

    /// The score is parsed with surrounding whitespace ignored.
    fn try_from(row: ScoreRow) -> Result<Self, Self::Error> {
        let score = row.score.trim().parse::<f64>().map_err(|e| {
            AppError::InvalidRecord(format!("score '{}' for {}: {}", row.score, row.user_id, e))
        })?;

        Ok(Self {
            board_key: leaderboard_key(&row.leaderboard),
            member: row.user_id,
            score,
        })
    }
}

/// Leaderboard member resolved to the email of its user hash
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEmail {
    pub member: String,
    pub email: String,
    pub score: f64,
}
