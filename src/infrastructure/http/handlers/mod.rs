//! HTTP Handlers

mod invoke;
mod ping;
mod records;

pub use invoke::*;
pub use ping::*;
pub use records::*;
