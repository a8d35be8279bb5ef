mod auth;
mod error_handler;
mod rate_limit;

pub use auth::{
    extract_session, is_authorized, require_admin, require_auth, require_candidate,
    require_employer,
};
pub use error_handler::log_errors;
pub use rate_limit::{RateLimiter, rate_limit};
