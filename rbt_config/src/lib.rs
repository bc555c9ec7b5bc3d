#![warn(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod settings;
pub mod ui;

pub use self::config::*;
pub use error::*;
pub use settings::*;
pub use ui::*;
