pub mod leaderboard_service;
pub mod search_service;
pub mod user_service;

pub use leaderboard_service::*;
pub use search_service::*;
pub use user_service::*;
