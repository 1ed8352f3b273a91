pub mod cli;
pub mod comic;
pub mod navigation;

pub use cli::Cli;
pub use comic::{ApiTarget, Comic};
pub use navigation::{InvalidPageSize, PageRequest, PageSize};
