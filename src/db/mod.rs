pub mod connection;
pub mod images;
pub mod locations;
pub mod properties;

pub use connection::{init_db, Database};
