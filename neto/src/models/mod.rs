//! Data models for the social network entities.

mod news;
mod profile;
mod session;

pub use news::NewsItem;
pub use profile::Profile;
pub use session::Session;
