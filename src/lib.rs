pub mod config;
pub mod digest;
pub mod observability;
pub mod pipeline;
pub mod record;
pub mod worker;
