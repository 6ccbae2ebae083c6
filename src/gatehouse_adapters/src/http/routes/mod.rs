pub mod change_password;
pub mod login;
pub mod refresh_token;
pub mod register;
pub mod request_password_change;
pub mod update_profile;
pub mod verify_2fa;

pub use change_password::{ChangePasswordRequest, change_password};
pub use login::{LoginRequest, login};
pub use refresh_token::refresh_token;
pub use register::{RegisterRequest, register};
pub use request_password_change::request_password_change;
pub use update_profile::{UpdateProfileRequest, update_profile};
pub use verify_2fa::{Verify2FaRequest, verify_2fa};
