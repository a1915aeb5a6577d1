/// Server services
pub mod accounts;
pub mod auth;
pub mod validation;

pub use accounts::{
    AccountService, ProfileUpdateRequest, SigninRequest, SignupOutcome, SignupRequest,
};
pub use auth::AuthService;
