//! Service layer over the dog store.
//! - `dogs::repository` abstracts persistence behind a trait.
//! - `dogs::service` is what HTTP handlers call.

pub mod errors;
pub mod runtime;
pub mod dogs;
#[cfg(test)]
pub mod test_support;
