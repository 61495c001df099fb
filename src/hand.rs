//! The hand landmark data model and finger classification.

pub mod fingers;
pub mod landmark;
pub mod poses;
