pub mod card;
pub mod error;
pub mod pagination;

pub use card::property_card;
pub use error::error_page;
pub use pagination::pagination;
