pub mod cake_service;


pub use cake_service::{CakeService, ServiceError, ServiceResult};
