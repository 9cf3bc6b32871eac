//! Database entities
//!
//! Note that these may have to be updated by hand.

pub mod prelude;

pub mod todo;
pub mod user;
