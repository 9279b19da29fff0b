// Infrastructure layer - Files, settings and the system clock
pub mod config;
pub mod json_store;
pub mod system_clock;
