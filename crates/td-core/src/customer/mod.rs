//! Customer lookups used by the wizard and the header search.

pub mod duplicate;
pub mod search;

pub use duplicate::{DuplicateCheckResponse, DuplicateCustomer, DuplicateQuery};
pub use search::{CustomerHit, CustomerSearchResponse, SearchQuery};
