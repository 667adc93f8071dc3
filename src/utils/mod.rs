pub mod debug;
pub mod error;
pub mod logger;
pub mod validation;
