//! Command handlers, one module per subcommand.

pub mod calc;
pub mod completion;
pub mod config_cmd;
pub mod report;
pub mod shell;
pub mod version;
