mod app;
pub mod render;

pub use app::{App, Command};
