// Build-time identity, served by GET /version

/// Crate version (Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name (Cargo.toml).
pub const NAME: &str = env!("CARGO_PKG_NAME");
