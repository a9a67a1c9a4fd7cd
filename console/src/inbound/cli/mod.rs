//! CLI inbound adapter: command tree, guard-driven dispatch, rendering.

pub mod commands;
pub mod dispatch;
pub mod render;

pub use commands::{Cli, Command};
pub use dispatch::App;
pub use render::TerminalNavigator;
