use serde::{Deserialize, Serialize};

use super::{status_error, ApiClient, ApiError};

#[derive(Debug, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Response of `POST /signin`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub token: String,
    #[serde(default)]
    pub refresh_token: String,
    pub user_id: String,
    #[serde(default)]
    pub name: String,
}

/// Response of `GET /users/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl ApiClient {
    /// Exchange email/password for a token. A rejection (401/403) comes
    /// back as `ApiError::Status`, which the login form shows inline.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<SignInResponse, ApiError> {
        let body = SignInRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp = self.http().post(self.url("/signin")).json(&body).send()?;
        if !resp.status().is_success() {
            return Err(status_error(resp.status()));
        }
        Ok(resp.json()?)
    }

    /// Resolve the greeting name for stored credentials.
    pub fn get_user(&self, token: &str, user_id: &str) -> Result<UserDto, ApiError> {
        let resp = self
            .http()
            .get(self.url(&format!("/users/{}", user_id)))
            .bearer_auth(token)
            .send()?;
        if !resp.status().is_success() {
            return Err(status_error(resp.status()));
        }
        Ok(resp.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_response_deserializes() {
        let json = r#"{
            "message": "Authenticated",
            "token": "eyJh.test.token",
            "refreshToken": "eyJh.refresh.token",
            "userId": "5ec993df4ca9f60017c1e5c6",
            "name": "student"
        }"#;
        let resp: SignInResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.token, "eyJh.test.token");
        assert_eq!(resp.user_id, "5ec993df4ca9f60017c1e5c6");
        assert_eq!(resp.name, "student");
    }

    #[test]
    fn sign_in_request_serializes_plain_fields() {
        let req = SignInRequest {
            email: "a@b.c".into(),
            password: "hunter2".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["email"], "a@b.c");
        assert_eq!(json["password"], "hunter2");
    }
}
