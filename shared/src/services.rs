pub mod pool_service;
pub mod user_service;

pub use pool_service::PoolService;
pub use user_service::UserService;
