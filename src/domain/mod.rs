pub mod date;
pub mod exercise;
pub mod user;
