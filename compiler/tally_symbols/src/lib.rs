//! Symbols for tally expressions.
//!
//! Three pieces, used in this order:
//!
//! ```text
//! discover(expr) ──► SymbolTableBuilder   (names, all values zero)
//!                         │
//! load_values(table) ─────┤               (scalar values, array buffers)
//!                         ▼
//!                    build() ──► SymbolTable   (frozen, shared by reference)
//! ```
//!
//! A name is either a scalar or an array, never both. The frozen table has no
//! mutating API, so it can be handed to any number of concurrent evaluations.

mod discover;
mod error;
mod loader;
mod table;

pub use discover::{discover, discover_into};
pub use error::{LoadError, SymbolError};
pub use loader::{load_values, load_values_from_path, LoadReport, MAX_ARRAY_LEN};
pub use table::{Symbol, SymbolKind, SymbolTable, SymbolTableBuilder};
