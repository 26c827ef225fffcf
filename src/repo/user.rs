use std::sync::Arc;

use crate::error::{ApiError, Result};
use crate::model::{mapper, wire, User, UserId};
use crate::{log_api_request, log_api_result};

use super::transport::HttpTransport;

#[derive(Clone)]
pub struct UserRepo {
    transport: Arc<HttpTransport>,
}

impl UserRepo {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// GET /users/{user_id}
    pub async fn get_user(&self, id: &UserId) -> Result<User> {
        log_api_request!("user", id = %id);
        let result = self
            .transport
            .get::<wire::User>(&["users", id.as_str()], &[])
            .await
            .map(|user| mapper::user(user, id));
        log_api_result!("user", result);
        result
    }

    /// GET /me
    pub async fn get_current_user(&self) -> Result<User> {
        log_api_request!("current_user");
        let result = self
            .transport
            .get::<wire::User>(&["me"], &[])
            .await
            .and_then(|user| {
                // no requested id to fall back on here
                let id = user
                    .id
                    .clone()
                    .ok_or_else(|| ApiError::DecodeFailed("current user has no id".into()))
                    .and_then(UserId::new)?;
                Ok(mapper::user(user, &id))
            });
        log_api_result!("current_user", result);
        result
    }
}
