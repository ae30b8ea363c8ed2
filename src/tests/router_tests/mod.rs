mod admin_tests;
mod api_tests;
mod page_tests;
