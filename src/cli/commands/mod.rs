mod command_result;
pub mod health;
pub mod init;
pub mod scan;
pub mod sync;

pub use command_result::*;
