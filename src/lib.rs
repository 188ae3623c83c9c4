pub mod api;
pub mod cli;
pub mod core;
pub mod extract;
pub mod layout;
pub mod render;
pub mod schedule;
pub mod session;
