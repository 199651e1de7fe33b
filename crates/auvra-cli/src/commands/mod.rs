pub mod chat;
pub mod config;
pub mod labels;
pub mod rewards;
