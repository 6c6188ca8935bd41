//! Configuration loading and resolution.
//!
//! `load` is the entry point: it layers the config file, environment
//! variables and CLI overrides, then resolves the result into a validated
//! [`Settings`].

mod loader;
mod raw;
mod resolved;

pub use loader::load;
pub use resolved::Settings;
