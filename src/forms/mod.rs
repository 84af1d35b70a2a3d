//! Request payloads and their validation rules.

pub mod products;
