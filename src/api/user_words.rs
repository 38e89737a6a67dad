use serde::{Deserialize, Serialize};

use super::{status_error, ApiClient, ApiError};

/// Per-user-per-word mastery record kept by the remote store.
/// `optional.progress` moves by ±1 per judged answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserWord {
    pub difficulty: String,
    pub optional: UserWordOptional,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserWordOptional {
    pub new: bool,
    pub progress: i32,
}

impl UserWord {
    /// Record created when a word is answered for the first time.
    pub fn fresh() -> Self {
        Self {
            difficulty: "simple".to_string(),
            optional: UserWordOptional {
                new: false,
                progress: 0,
            },
        }
    }

    /// Same record with the mastery counter moved by `delta`, all other
    /// fields preserved.
    pub fn with_progress_delta(&self, delta: i32) -> Self {
        Self {
            difficulty: self.difficulty.clone(),
            optional: UserWordOptional {
                new: self.optional.new,
                progress: self.optional.progress + delta,
            },
        }
    }
}

impl ApiClient {
    /// `GET /users/{id}/words/{wordId}`; absence is a true 404 and maps
    /// to `ApiError::NotFound`, everything else keeps its own variant.
    pub fn get_user_word(
        &self,
        token: &str,
        user_id: &str,
        word_id: &str,
    ) -> Result<UserWord, ApiError> {
        let resp = self
            .http()
            .get(self.url(&format!("/users/{}/words/{}", user_id, word_id)))
            .bearer_auth(token)
            .send()?;
        if !resp.status().is_success() {
            return Err(status_error(resp.status()));
        }
        Ok(resp.json()?)
    }

    pub fn create_user_word(
        &self,
        token: &str,
        user_id: &str,
        word_id: &str,
        record: &UserWord,
    ) -> Result<(), ApiError> {
        let resp = self
            .http()
            .post(self.url(&format!("/users/{}/words/{}", user_id, word_id)))
            .bearer_auth(token)
            .json(record)
            .send()?;
        if !resp.status().is_success() {
            return Err(status_error(resp.status()));
        }
        Ok(())
    }

    pub fn update_user_word(
        &self,
        token: &str,
        user_id: &str,
        word_id: &str,
        record: &UserWord,
    ) -> Result<(), ApiError> {
        let resp = self
            .http()
            .put(self.url(&format!("/users/{}/words/{}", user_id, word_id)))
            .bearer_auth(token)
            .json(record)
            .send()?;
        if !resp.status().is_success() {
            return Err(status_error(resp.status()));
        }
        Ok(())
    }
}
