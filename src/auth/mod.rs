//! Pass-through of the end user's backend session.
//!
//! Whether a caller may insert annotations is decided by the backend's row-level policy; this
//! module only carries the bearer token from the incoming request to the backend request.

pub mod extractors;
pub mod responses;
