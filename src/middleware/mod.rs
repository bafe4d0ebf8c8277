//! Middleware for Flowerbed.
//!
//! - `owner_cookie` - reads the `flower_owner` ownership cookie

mod owner_cookie;

pub use owner_cookie::{owner_cookie, read_owner_cookie, OwnerCookie, OWNER_COOKIE_NAME};
