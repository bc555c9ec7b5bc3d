pub mod menu;
pub mod theme;

pub use menu::*;
pub use theme::*;
