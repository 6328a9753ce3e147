pub mod route_pipeline_service;

pub use route_pipeline_service::*;
