pub mod answer;
pub mod chain;
pub mod config;
pub mod dispatch;
pub mod question;
pub mod session;
pub mod shared;
