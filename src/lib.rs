pub mod catalog;
pub mod cli;
pub mod config;
pub mod farm;
pub mod notify;
pub mod player;
pub mod session;
pub mod simulation;
pub mod snapshot;
pub mod state;
