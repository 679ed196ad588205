//! Terminal client: board display, move entry, status line.

mod app;
mod input;
mod render;

pub use app::App;
pub use input::{parse_command, Command};
