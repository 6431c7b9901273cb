//! different utility modules used throughout the project
/// logger initialisation (console and optional file)
pub mod logger;
