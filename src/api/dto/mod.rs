//! Data Transfer Objects for API responses.
//!
//! Status and health payloads are served as the domain types themselves;
//! only the error envelope lives here.

mod error;

pub use error::ErrorResponse;
