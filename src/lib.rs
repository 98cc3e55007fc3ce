pub mod app;
pub mod core;
pub mod display;
pub mod scanner;
