//! Request handlers

pub mod generate;
pub mod health;

pub use generate::generate_router;
pub use health::health_router;
