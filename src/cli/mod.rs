//! # Command-Line Interface
//!
//! A thin shell over [`Store`](crate::storage::Store).
//!
//! | Command | Store operation |
//! |---------|-----------------|
//! | `init` | construct (create or reuse the root) |
//! | `write <collection> <resource> [value]` | `write` |
//! | `read <collection> <resource>` | `read` |
//! | `read-all <collection>` | `read_all` |
//! | `list <collection>` | `resources` |
//! | `delete <collection> [resource]` | `delete` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output, including the store's own
//! diagnostics:
//! ```bash
//! jsondb --verbose read-all fish
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod config;
mod output;
mod record;

pub use app::{run, Cli, Commands};
pub use config::{CodecKind, Config, ConfigError};
pub use output::{Output, OutputFormat};
