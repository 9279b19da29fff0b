// Presentation layer - CLI arguments and console output
pub mod cli;
pub mod console;
