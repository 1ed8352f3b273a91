pub mod command;
pub mod comic_client;
pub mod configuration;
pub mod models;
pub mod normalize;
pub mod pager;
pub mod run;
pub mod view;

#[cfg(test)]
mod test_utils;

pub use configuration::Settings;
pub use models::Cli;
pub use run::run;
