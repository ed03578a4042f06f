//! HTTP handlers

pub mod comment;
pub mod health;
pub mod options;
pub mod page;
