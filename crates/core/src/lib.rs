pub mod caught;
pub mod constants;
pub mod env;
pub mod error;
pub mod structured;

pub use error::{ConfigError, Error, ErrorBuilder, Result, TransportError};

// Re-export the error model for convenience
pub use caught::{CaughtError, UnclassifiedError};
pub use env::{Environment, ProcessEnv, StaticEnv};
pub use structured::{ErrorData, ErrorOutput, ErrorPayload, StructuredError};
