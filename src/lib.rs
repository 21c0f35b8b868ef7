//! Bloomfield library crate — re-exports all modules for integration
//! testing.
//!
//! The binary crate (`main.rs`) is the actual game entry point. This
//! library crate exposes the same modules so that `tests/` integration
//! tests can import simulation types, systems, and resources and drive
//! the whole engine headlessly.

pub mod climate;
pub mod clock;
pub mod data;
pub mod economy;
pub mod garden;
pub mod progress;
pub mod save;
pub mod session;
pub mod shared;
