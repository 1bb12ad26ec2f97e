//! Provider adapter implementations

mod command;

pub use command::CommandProvider;
