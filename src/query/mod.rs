//! Query engine
//!
//! Structured filters over stored records and the heuristic translation of
//! free-text queries into those filters. Both halves are pure: nothing in
//! this module touches the repository.

pub mod filter;
pub mod natural;

pub use filter::StringFilter;
pub use natural::{translate, TranslateError, TranslatedQuery};
