//! Application configuration domain

mod entity;

pub use entity::{AppConfiguration, DEFAULT_DISPLAY_MODE, DEFAULT_LANGUAGE, DEFAULT_THEME};
