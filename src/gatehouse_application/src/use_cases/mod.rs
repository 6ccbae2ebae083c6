pub mod change_password;
pub mod login;
pub mod register;
pub mod request_password_change;
pub mod update_profile;
pub mod verify_two_fa;

#[cfg(test)]
pub(crate) mod test_support;
