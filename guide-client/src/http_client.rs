use crate::error::GuideClientError;
use crate::{NewPlace, Place, RegisteredUser};
use reqwest::Client;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_TOKEN_FILE: &str = ".guide_token";

#[derive(Clone)]
pub struct GuideClientHttp {
    client: Client,
    base_url: String,
    token: Option<String>,
    token_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct SeedResponse {
    inserted: usize,
}

impl GuideClientHttp {
    pub fn connect(endpoint: &str) -> Result<Self, GuideClientError> {
        Self::with_token_path(endpoint, DEFAULT_TOKEN_FILE)
    }

    pub fn with_token_path(
        endpoint: &str,
        token_path: impl Into<PathBuf>,
    ) -> Result<Self, GuideClientError> {
        let base_url = endpoint.trim_end_matches('/').to_string();
        Ok(Self {
            client: Client::builder().build()?,
            base_url,
            token: None,
            token_path: token_path.into(),
        })
    }

    pub fn set_token(&mut self, token: String) -> Result<(), GuideClientError> {
        fs::write(&self.token_path, &token)?;
        self.token = Some(token);
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Forgets the token, both in memory and on disk.
    pub fn logout(&mut self) -> Result<(), GuideClientError> {
        self.token = None;
        match fs::remove_file(&self.token_path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    /// Token from memory, falling back to the token file.
    fn stored_token(&self) -> Result<String, GuideClientError> {
        let token = match &self.token {
            Some(t) if !t.is_empty() => t.clone(),
            _ => fs::read_to_string(&self.token_path)
                .map(|t| t.trim().to_string())
                .unwrap_or_default(),
        };
        if token.is_empty() {
            return Err(GuideClientError::Unauthorized("not logged in".into()));
        }
        Ok(token)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    pub async fn register(
        &self,
        email: String,
        password: String,
        admin: bool,
    ) -> Result<RegisteredUser, GuideClientError> {
        let resp = self
            .client
            .post(self.url("/auth/register"))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "admin": admin,
            }))
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(GuideClientError::from_http_response(resp).await)
        }
    }

    pub async fn login(&mut self, email: String, password: String) -> Result<(), GuideClientError> {
        let resp = self
            .client
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(GuideClientError::from_http_response(resp).await);
        }
        let auth: AuthResponse = resp.json().await?;
        debug!(path = %self.token_path.display(), "storing token");
        self.set_token(auth.token)
    }

    pub async fn create_place(&self, place: &NewPlace) -> Result<Place, GuideClientError> {
        let resp = self
            .client
            .post(self.url("/places"))
            .bearer_auth(self.stored_token()?)
            .json(place)
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(GuideClientError::from_http_response(resp).await)
        }
    }

    pub async fn list_places(&self, category: &str) -> Result<Vec<Place>, GuideClientError> {
        let mut url = reqwest::Url::parse(&self.url("/places"))
            .map_err(|e| GuideClientError::InvalidRequest(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| GuideClientError::InvalidRequest("base url cannot have a path".into()))?
            .push(category);

        let resp = self.client.get(url).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(GuideClientError::from_http_response(resp).await)
        }
    }

    pub async fn flow(&self) -> Result<Vec<Place>, GuideClientError> {
        let resp = self
            .client
            .get(self.url("/flow"))
            .bearer_auth(self.stored_token()?)
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(GuideClientError::from_http_response(resp).await)
        }
    }

    pub async fn seed(&self) -> Result<usize, GuideClientError> {
        let resp = self
            .client
            .post(self.url("/seed"))
            .bearer_auth(self.stored_token()?)
            .send()
            .await?;

        if resp.status().is_success() {
            let seeded: SeedResponse = resp.json().await?;
            Ok(seeded.inserted)
        } else {
            Err(GuideClientError::from_http_response(resp).await)
        }
    }
}
