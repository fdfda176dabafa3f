pub mod repository;
pub mod service;

pub use models::dog::{Model as Dog, NewDog};
