//! CLI argument surface for the `loadlite` binary.
mod cli;
mod parsers;
mod types;

#[cfg(test)]
mod tests;

pub use cli::LoadArgs;
pub use types::{OutputFormat, PositiveU64, PositiveUsize};
