pub mod columns;
mod types;

pub use types::*;
