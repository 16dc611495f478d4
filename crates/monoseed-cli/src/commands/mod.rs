//! Command handlers.
//!
//! Each handler translates parsed arguments into calls on `monoseed-core`
//! and renders the outcome. No business logic lives here.

pub mod completions;
pub mod create;
