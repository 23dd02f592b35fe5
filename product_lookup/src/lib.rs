pub mod config;
pub mod contracts;
pub mod display;
pub mod errors;
pub mod notification;
pub mod product;
