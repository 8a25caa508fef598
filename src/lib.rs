// Library for tests to access modules

pub mod compactor;
pub mod config;
pub mod metrics;
pub mod models;
pub mod probe;
pub mod report;
pub mod routes;
pub mod scheduler;
pub mod state;
pub mod version;
