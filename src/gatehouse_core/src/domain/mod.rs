pub mod email;
pub mod mobile;
pub mod password;
pub mod user;
pub mod verification_code;
