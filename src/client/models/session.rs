use crate::{
    app::util::time,
    auth::models::access_info::{AccessInfo, AuthUser},
    client::config::SESSION_TTL_SECS,
};

#[derive(Debug, PartialEq, Eq)]
pub enum SessionError {
    Expired,
}

/// Explicit session context: whoever needs the token gets handed one of
/// these, there is no process-wide singleton. Expiry is checked on every
/// restore.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: AuthUser,
    pub expires_at: u64,
}

impl Session {
    pub fn new(access_info: AccessInfo) -> Self {
        return Self {
            token: access_info.token,
            user: access_info.user,
            expires_at: time::current_time_in_secs() + SESSION_TTL_SECS,
        };
    }

    pub fn restore(token: String, user: AuthUser, expires_at: u64) -> Result<Self, SessionError> {
        if time::current_time_in_secs() >= expires_at {
            return Err(SessionError::Expired);
        }

        Ok(Self {
            token,
            user,
            expires_at,
        })
    }

    pub fn is_expired(&self) -> bool {
        time::current_time_in_secs() >= self.expires_at
    }
}
