//! Query Handlers

mod record_handlers;

pub use record_handlers::*;
