//! One module per subcommand.

pub mod add;
pub mod completions;
pub mod delete;
pub mod list;
pub mod menu;
pub mod migrate;
pub mod search;
pub mod show;
pub mod update;
