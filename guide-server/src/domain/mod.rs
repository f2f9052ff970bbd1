pub mod error;
pub mod place;
pub mod user;
