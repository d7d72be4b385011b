pub mod forecast;
pub mod service;
