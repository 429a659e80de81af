//! Application state module

mod app_state;
mod forms;
mod session;

pub use app_state::*;
pub use forms::*;
pub use session::*;
