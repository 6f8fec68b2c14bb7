//! Domain records exchanged with the library and blog APIs.

pub mod blog;
pub mod book;
pub mod borrow;
pub mod page;
pub mod settings;
pub mod types;
pub mod user;
