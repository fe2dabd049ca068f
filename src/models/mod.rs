mod user;
mod user_flags;

pub use user::{Favorite, User};
pub use user_flags::UserFlags;
