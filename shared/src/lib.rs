pub mod errors;
pub mod gateway;
pub mod models;
pub mod providers;
pub mod response;
pub mod roles;
pub mod services;

pub use errors::*;
pub use models::*;
pub use providers::*;
pub use response::*;
pub use roles::*;
pub use services::*;
