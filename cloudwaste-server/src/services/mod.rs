mod route_service;

pub use route_service::*;
