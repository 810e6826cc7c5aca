pub mod capture;
pub mod config;
pub mod control;
pub mod error;
pub mod event;
pub mod parser;
pub mod state;
pub mod tokio;

pub(crate) mod process;
