//! Core types for the import pipeline

mod cell;
mod diagnostic;
mod history;
mod record;
mod result;

pub use cell::*;
pub use diagnostic::*;
pub use history::*;
pub use record::*;
pub use result::*;
