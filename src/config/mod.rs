//! Configuration module for FinBud
//!
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FinbudPaths;
pub use settings::Settings;
