pub mod commands;
pub mod console;
