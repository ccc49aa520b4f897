use crate::api::schemas::required_text;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct NewUserRequest {
    pub username: Option<String>,
}

impl NewUserRequest {
    /// Returns the trimmed username.
    ///
    /// # Errors
    /// Returns a message if the username is missing, blank or holds a NUL.
    pub fn validate(self) -> Result<String, String> {
        required_text(self.username, "username")
    }
}

#[derive(Debug, Serialize)]
pub struct NewUserResponse {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: Uuid,
}
