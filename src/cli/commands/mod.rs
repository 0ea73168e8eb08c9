pub mod check;
pub mod clean;
mod command_result;
pub mod export;
pub mod fmt;
pub mod helper;
pub mod init;
pub mod stats;
pub mod strip;

pub use command_result::*;
