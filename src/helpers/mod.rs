//! Helper functions shared by the parser and the template filters

mod date;
mod list;

pub use date::*;
pub use list::*;
