//! Subcommand arguments and handlers

pub mod check_tag;
pub mod history;
pub mod import;
pub mod template;

pub use check_tag::CheckTagArgs;
pub use history::HistoryArgs;
pub use import::ImportArgs;
pub use template::TemplateArgs;
