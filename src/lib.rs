pub mod config;
pub mod contest;
pub mod output;
pub mod ranking;
