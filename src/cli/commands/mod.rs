pub mod add;
pub mod burndown;
pub mod config;
pub mod costs;
pub mod db;
pub mod export;
pub mod import;
pub mod init;
pub mod log;
pub mod verify;
