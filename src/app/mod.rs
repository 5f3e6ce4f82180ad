#[cfg(feature = "cli")]
pub mod commands;
