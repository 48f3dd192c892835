pub mod guard;
pub mod token;

pub use guard::authorize;
pub use token::{Claims, TokenCodec, TOKEN_TTL_DAYS};
