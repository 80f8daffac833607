pub mod cli;
pub mod file_names;
pub mod interactive;
pub mod ports;
pub mod session;
