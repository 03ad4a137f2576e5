//! Service layer providing the cafe operations on top of `models`.
//! - Each operation takes the connection explicitly; there is no global handle.
//! - Storage faults are translated into [`errors::ServiceError`] variants.

pub mod errors;
pub mod cafe_service;
#[cfg(test)]
pub mod test_support;
