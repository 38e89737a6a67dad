use serde::Deserialize;

use super::{status_error, ApiClient, ApiError};

/// Words per server page; fixed by the remote service.
pub const PAGE_SIZE: usize = 20;
/// Difficulty groups are enumerated 0..=5 by the service.
pub const GROUP_COUNT: u8 = 6;
/// Pages per group are enumerated 0..=29 by the service.
pub const PAGE_COUNT: u8 = 30;

/// One vocabulary item as served by `GET /words`. Read-only within a
/// session; unknown server fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordItem {
    pub id: String,
    pub word: String,
    pub word_translate: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub audio: String,
}

impl ApiClient {
    /// Fetch one page of words for a difficulty group.
    pub fn get_words(&self, group: u8, page: u8) -> Result<Vec<WordItem>, ApiError> {
        let resp = self
            .http()
            .get(self.url("/words"))
            .query(&[("group", group), ("page", page)])
            .send()?;
        if !resp.status().is_success() {
            return Err(status_error(resp.status()));
        }
        Ok(resp.json()?)
    }

    /// Fetch three random pages of a group concurrently and concatenate
    /// them in request order. The sprint game oversamples this way so it
    /// cannot run out of material before its timer does.
    pub fn get_words_oversampled(&self, group: u8) -> Result<Vec<WordItem>, ApiError> {
        use rand::Rng;

        let pages: Vec<u8> = {
            let mut rng = rand::thread_rng();
            (0..3).map(|_| rng.gen_range(0..PAGE_COUNT)).collect()
        };

        let handles: Vec<_> = pages
            .into_iter()
            .map(|page| {
                let client = self.clone();
                std::thread::spawn(move || client.get_words(group, page))
            })
            .collect();

        let mut words = Vec::with_capacity(3 * PAGE_SIZE);
        for handle in handles {
            let page = handle.join().map_err(|_| ApiError::Worker).and_then(|res| res)?;
            words.extend(page);
        }
        Ok(words)
    }
}
