pub mod config;
pub mod framework;
pub mod init;
pub mod status;
pub mod steering;
