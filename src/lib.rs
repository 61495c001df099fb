//! Counts fingers so you don't have to.

pub mod detector;
pub mod game;
pub mod hand;
pub mod pipeline;
pub mod server;
pub mod snapshot;
pub mod source;
pub mod timer;
pub mod worker;

pub type Error = Box<dyn std::error::Error + Sync + Send>;
