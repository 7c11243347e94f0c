//! Place search against an external geocoding service.
//!
//! [`NominatimClient`] performs a single lookup and degrades every failure to
//! an empty result list. [`SearchDebouncer`] sits in front of any
//! [`PlaceSearch`] and turns keystrokes into at most one lookup per pause.

pub mod client;
pub mod debounce;
pub mod error;
pub mod source;

pub use client::{is_searchable, NominatimClient, DEFAULT_RESULT_LIMIT, MIN_QUERY_LEN};
pub use debounce::{SearchDebouncer, SearchSnapshot, DEFAULT_DEBOUNCE};
pub use error::SearchError;
pub use source::PlaceSearch;
