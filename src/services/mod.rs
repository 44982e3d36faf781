mod jwt_service;
mod redis_service;

pub use jwt_service::{Claims, JwtService};
pub use redis_service::RedisService;
