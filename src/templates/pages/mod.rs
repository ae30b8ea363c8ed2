pub mod admin;
pub mod home;
pub mod property_detail;
pub mod property_list;

pub use admin::{admin_page, location_form_page, property_form_page, AdminVm, PropertyFormVm};
pub use home::home_page;
pub use property_detail::property_detail_page;
pub use property_list::{property_list_page, PropertyListVm};
