use crate::auth::application::ports::incoming::password_policy::{
    PasswordPolicy, PasswordPolicyError,
};

pub const MIN_PASSWORD_LEN: usize = 8;
/// bcrypt ignores input past 72 bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPasswordPolicy;

impl PasswordPolicy for BasicPasswordPolicy {
    fn validate(&self, password: &str) -> Result<(), PasswordPolicyError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(PasswordPolicyError::TooShort(MIN_PASSWORD_LEN));
        }

        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordPolicyError::TooLong(MAX_PASSWORD_BYTES));
        }

        Ok(())
    }
}
