//! In-memory session shared with the views.

mod context;

pub use context::SessionContext;
