//! File loading and configuration paths for studylens

mod error;
mod io;
mod paths;

pub use error::LoadError;
pub use io::{atomic_write, load_records, parse_records, write_json};
pub use paths::{load_catalogs, load_config, Paths};
