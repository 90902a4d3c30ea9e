//! Server Module
//!
//! Server setup: configuration loading, application state and
//! initialization.
//!
//! - **`config`** - Environment configuration and database loading
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`init`** - Application assembly (`create_app`)

/// Environment configuration
pub mod config;

/// Application state
pub mod state;

/// Application assembly
pub mod init;

// Re-export commonly used items
pub use config::ServerConfig;
pub use init::create_app;
pub use state::AppState;
