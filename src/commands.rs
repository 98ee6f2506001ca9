//! Command façade: the boundary between a chat transport and the playlist core.
//!
//! A transport turns whatever it receives into a [`Request`], calls
//! [`CommandHandler::handle`], and delivers the [`Reply`]. Every failure comes
//! back as a short, specific reply; nothing here terminates the process.

mod handler;
mod model;
pub mod render;

pub use handler::CommandHandler;
pub use model::*;
