pub mod score;
pub mod search;
pub mod user;

pub use score::*;
pub use search::*;
pub use user::*;
