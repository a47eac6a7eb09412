//! Client-local persistence of the session.

mod kv;
mod session_store;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use session_store::{SessionStore, PROFILE_KEY, TOKEN_KEY};
