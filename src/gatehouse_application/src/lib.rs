pub mod use_cases;

pub use use_cases::{
    change_password::{ChangePasswordError, ChangePasswordUseCase},
    login::{LoginError, LoginUseCase},
    register::{RegisterError, RegisterUseCase},
    request_password_change::{RequestPasswordChangeError, RequestPasswordChangeUseCase},
    update_profile::{UpdateProfileError, UpdateProfileUseCase},
    verify_two_fa::{VerifyTwoFaError, VerifyTwoFaUseCase},
};
