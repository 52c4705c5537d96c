pub mod catalog;
pub mod config;
pub mod input;
pub mod logging;
pub mod recommend;
