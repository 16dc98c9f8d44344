pub mod config;
pub mod data;
pub mod distribution;
pub mod error;
pub mod report;
pub mod seating;
pub mod selection;
pub mod server;
