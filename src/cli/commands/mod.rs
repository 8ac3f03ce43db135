pub mod backup;
pub mod config;
pub mod db;
pub mod init;
pub mod log;
