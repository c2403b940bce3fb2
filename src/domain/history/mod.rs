//! Explanation history domain

mod entity;

pub use entity::HistoryEntry;
