//! API request and response types

pub mod envelope;
pub mod error;
pub mod query;

pub use envelope::ApiResponse;
pub use error::{ApiError, ApiErrorResponse};
pub use query::{PageQuery, Query, SearchQuery};
