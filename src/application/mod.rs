// Application layer - Use cases of the soft sensor demo
pub mod audit_log;
pub mod clock;
pub mod pipeline;
pub mod series_generator;
pub mod soft_sensor;
