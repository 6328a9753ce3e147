pub mod console_logger;
pub mod file_logger;
pub mod filesystem_store;
pub mod multi_logger;
pub mod noop_logger;

pub use console_logger::*;
pub use file_logger::*;
pub use filesystem_store::*;
pub use multi_logger::*;
pub use noop_logger::*;
