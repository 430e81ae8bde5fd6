//! JSON API handlers.

mod system;
mod teachers;


pub use system::*;
pub use teachers::*;
