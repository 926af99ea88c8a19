//! # wamon-core - Core Domain Types
//!
//! Foundation crate for wamon. Provides domain types and error handling
//! shared by the gateway client, the application layer, and the TUI.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Instance`] - A named messaging instance with its last observed status
//! - [`ConnectionStatus`] - Gateway connection status (`open` | `close`)
//! - [`ConnectionState`] - Status plus free-text detail from a state query
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use wamon_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all wamon crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use types::{ConnectionState, ConnectionStatus, Instance};
