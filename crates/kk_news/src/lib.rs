pub mod cli;
pub mod digest;
pub mod newsapi;

pub use cli::{handle_command, NewsArgs};
pub use digest::NewsDigest;
pub use newsapi::NewsApiClient;

pub mod prelude {
    pub use super::digest::NewsDigest;
    pub use super::newsapi::NewsApiClient;
    pub use kk_core::{Article, Error, NewsQuery, NewsSource, Result};
}
