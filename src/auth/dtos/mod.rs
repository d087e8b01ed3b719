use regex::Regex;

pub mod login_dto;
pub mod signup_dto;

lazy_static! {
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_.-]{3,24}$").unwrap();
}
