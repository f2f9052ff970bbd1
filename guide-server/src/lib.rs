//! Place guide backend: accounts with an admin flag, a catalogue of places
//! grouped by category, and a small "flow" recommending places from the
//! busiest category.

pub mod application;
pub mod data;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod server;
