pub mod bearer;
pub mod session_cookie;
pub mod token_service;
