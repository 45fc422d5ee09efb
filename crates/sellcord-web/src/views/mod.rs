//! HTML views
//!
//! Views are plain functions from data to markup. Every piece of text that
//! comes from a user or from the admin API goes through [`escape`].

pub mod dashboard;
pub mod layout;
pub mod login;
pub mod users;

pub use layout::{Tone, escape, not_found_page};
