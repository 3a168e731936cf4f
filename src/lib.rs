pub mod allocation;
pub mod config;
pub mod error;
pub mod feedback;
pub mod model;
pub mod outcome;
pub mod output;
pub mod sector;
pub mod server;
