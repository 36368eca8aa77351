pub mod config;
pub mod error;
pub mod gateway;
pub mod history;
pub mod session;
pub mod theme;
pub mod ui;

pub use error::{Error, Result};
