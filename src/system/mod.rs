pub mod collector;
pub mod cpu;
pub mod error;
pub mod reader;
pub mod scalars;
pub mod snapshot;
pub mod tasks;
pub mod users;

pub use error::ProcfsError;
pub use reader::{BoundedString, ProcRoot};
