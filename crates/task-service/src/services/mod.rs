pub mod password_service;
pub mod task_service;
pub mod token_service;
pub mod user_service;

pub use password_service::{BcryptPasswordService, PasswordService};
pub use task_service::TaskService;
pub use token_service::{JwtTokenService, TokenService};
pub use user_service::UserService;
