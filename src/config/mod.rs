//! Configuration for autoserver.
//!
//! An optional `autoserver.yaml` supplies host-level defaults that rarely
//! change between runs (template location, interpreter, system link
//! directories). Command-line flags always take precedence.

mod model;
mod operations;


pub use model::Config;
