// TSS Calendar - API Core
//
// This crate provides the backend API for turning form submissions into
// moderated calendar events. External services (form source, document
// store, mail, decision model) sit behind kernel traits.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
