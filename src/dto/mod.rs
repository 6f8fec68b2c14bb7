//! DTO modules that bridge services with templates.

pub mod blog;
pub mod list;
pub mod main;
pub mod settings;
