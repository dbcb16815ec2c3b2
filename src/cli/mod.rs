pub mod args;
pub mod commands;

pub use args::{Cli, Commands, JoinOverrides};
pub use commands::run;
