pub mod api;
pub mod ask;
pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod matching;
pub mod models;
pub mod services;
