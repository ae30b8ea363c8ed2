//! Server-rendered pages and the admin forms.

pub mod admin;
pub mod pages;
