//! # Book Explorer Common Library
//!
//! Shared code for the Book Explorer crates:
//! - Common error type
//! - Text cleaning applied to every upstream text field
//! - Configuration model and resolution (CLI → ENV → TOML → defaults)

pub mod config;
pub mod error;
pub mod text;

pub use config::{get_user_agent, LoggingConfig, ProviderSettings, SearchUiSettings, TomlConfig};
pub use error::{Error, Result};
pub use text::clean_text;
