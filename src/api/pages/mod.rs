//! Server-rendered teacher pages.

mod teachers;
mod views;


pub use teachers::*;
