pub mod console;
pub mod error;

pub use console::Console;
pub use error::{AppError, AppResult};
