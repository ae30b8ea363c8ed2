pub mod image;
pub mod location;
pub mod pagination;
pub mod property;

pub use image::{NewImage, PropertyImage};
pub use location::{Location, NewLocation};
pub use pagination::{Page, PageWindow};
pub use property::{Property, PropertyDetail, PropertyFields, PropertySummary};
