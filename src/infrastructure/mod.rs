pub mod audio;
pub mod config;
pub mod db;
pub mod http;
pub mod repositories;
pub mod retry;
