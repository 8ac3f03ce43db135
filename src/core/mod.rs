pub mod backup;
pub mod config;
pub mod init;
pub mod log;
