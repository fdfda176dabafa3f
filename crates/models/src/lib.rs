//! Persistence layer: the `dogs` entity, connection setup and schema bootstrap.

pub mod errors;
pub mod db;
pub mod dog;

#[cfg(test)]
mod tests;
