use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SignupDto {
    #[validate(regex(
        path = "crate::auth::dtos::USERNAME_REGEX",
        message = "username must be between 3 and 24 characters (letters, numbers, '_', '.', '-')."
    ))]
    pub username: String,
    #[validate(email(message = "email must be a valid email address."))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters."))]
    pub password: String,
}
