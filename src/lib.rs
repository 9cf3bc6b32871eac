//! A personal reading list: one user, a list of titles, and HTML forms to manage them.

pub mod commands;
pub mod config;
pub mod error;
pub mod server;
pub mod store;

mod constants;
mod flash;
mod handlers;
mod render;
