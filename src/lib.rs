pub mod chart;
pub mod config;
pub mod credentials;
pub mod github;
pub mod metrics;
pub mod output;
pub mod pipeline;
pub mod stderr_buffer;
