pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::{Email, EmailError},
    mobile::{Mobile, MobileError},
    password::{Password, PasswordError},
    user::{NewUser, ProfileUpdate, User, UserId, UserIdError, UserName, UserNameError},
    verification_code::{VerificationCode, VerificationCodeError},
};

pub use ports::{
    repositories::{UserStore, UserStoreError, VerificationCodeStore, VerificationCodeStoreError},
    services::SmsClient,
};
