pub mod errors;

pub use errors::{ExtractError, ExtractResult};
