pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod state;
pub mod validation;

pub use error::{ApiError, ErrorResponse};
pub use rate_limit::FixedWindowLimiter;
pub use state::AppState;
pub use validation::{FieldError, FieldErrors};
