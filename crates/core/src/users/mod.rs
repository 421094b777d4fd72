//! Users module - registration, authentication, and identity scoping.

mod users_errors;
mod users_model;
mod users_service;
mod users_traits;


pub use users_errors::UserError;
pub use users_model::{Identity, NewUser, User};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
