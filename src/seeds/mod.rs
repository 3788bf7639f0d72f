pub mod scores_seed;
pub mod users_seed;

pub use scores_seed::load_scores;
pub use users_seed::load_users;
