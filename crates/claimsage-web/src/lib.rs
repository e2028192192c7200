//! HTTP surface for the patent question-answering service.

pub mod config;
pub mod handlers;
pub mod router;
pub mod state;
