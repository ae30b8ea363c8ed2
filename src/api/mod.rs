//! Read-only JSON API under `/api/`.

pub mod dto;
pub mod locations;
pub mod properties;
