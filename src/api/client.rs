//! `reqwest` implementation of [`UsersApi`].

use anyhow::Context as _;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{ApiResponse, UsersApi};
use crate::error::{ApiError, Result};
use crate::model::{User, UserData};

/// Success envelope: `{ "data": ... }`.
#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

/// Structured error body; only `message` is used.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for `<base>/users`.
#[derive(Clone, Debug)]
pub struct HttpUsersApi {
    client: Client,
    base: Url,
}

impl HttpUsersApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("userdash/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url).with_context(|| format!("invalid api url '{base_url}'"))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("api url '{base_url}' cannot carry a path");
        }
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `<base>/users` or `<base>/users/<id>`, with the id encoded as one segment.
    fn users_url(&self, id: Option<&str>) -> std::result::Result<Url, ApiError> {
        let mut url = self.base.clone();
        {
            let mut segs = url
                .path_segments_mut()
                .map_err(|_| ApiError::transport("api url cannot carry a path"))?;
            segs.pop_if_empty().push("users");
            if let Some(id) = id {
                segs.push(id);
            }
        }
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        id: Option<&str>,
    ) -> std::result::Result<RequestBuilder, ApiError> {
        let url = self.users_url(id)?;
        debug!(%method, %url, "sending request");
        Ok(self.client.request(method, url))
    }

    /// Send and return the status plus raw body; non-2xx answers become errors.
    async fn send(&self, req: RequestBuilder) -> std::result::Result<(u16, Vec<u8>), ApiError> {
        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;
        if status.is_success() {
            return Ok((status.as_u16(), body.to_vec()));
        }
        let server_message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);
        Err(ApiError::from_status(status.as_u16(), server_message))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> std::result::Result<(u16, Option<T>), ApiError> {
        let (status, body) = self.send(req).await?;
        let envelope: Envelope<T> =
            serde_json::from_slice(&body).map_err(|e| ApiError::Shape(e.to_string()))?;
        Ok((status, envelope.data))
    }

    async fn fetch_one(&self, req: RequestBuilder) -> std::result::Result<(u16, User), ApiError> {
        match self.fetch::<User>(req).await? {
            (status, Some(user)) => Ok((status, user)),
            (_, None) => Err(ApiError::Shape("missing user record".to_string())),
        }
    }
}

/// Turn a call outcome into the uniform shape, logging failures.
fn settle<T>(op: &str, res: std::result::Result<(u16, T), ApiError>) -> ApiResponse<T> {
    match res {
        Ok((status, data)) => ApiResponse::ok(data).with_status(status),
        Err(e) => {
            warn!(op, error = %e, "users api call failed");
            ApiResponse::failed(&e)
        }
    }
}

#[async_trait]
impl UsersApi for HttpUsersApi {
    async fn list(&self) -> ApiResponse<Vec<User>> {
        let res = async {
            let req = self.request(Method::GET, None)?;
            let (status, users) = self.fetch::<Vec<User>>(req).await?;
            Ok::<_, ApiError>((status, users.unwrap_or_default()))
        }
        .await;
        settle("list", res)
    }

    async fn get_by_id(&self, id: &str) -> ApiResponse<User> {
        let res = async {
            let req = self.request(Method::GET, Some(id))?;
            self.fetch_one(req).await
        }
        .await;
        settle("get", res)
    }

    async fn create(&self, payload: &UserData) -> ApiResponse<User> {
        let res = async {
            let req = self.request(Method::POST, None)?.json(payload);
            self.fetch_one(req).await
        }
        .await;
        settle("create", res)
    }

    async fn update(&self, id: &str, payload: &UserData) -> ApiResponse<User> {
        let res = async {
            let req = self.request(Method::PUT, Some(id))?.json(payload);
            self.fetch_one(req).await
        }
        .await;
        settle("update", res)
    }

    async fn delete(&self, id: &str) -> ApiResponse<()> {
        let res = async {
            let req = self.request(Method::DELETE, Some(id))?;
            let (status, _) = self.send(req).await?;
            Ok::<_, ApiError>((status, ()))
        }
        .await;
        settle("delete", res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_resource_urls_under_base_path() {
        let api = HttpUsersApi::new("http://localhost:5000/api").expect("client");
        assert_eq!(
            api.users_url(None).expect("url").as_str(),
            "http://localhost:5000/api/users"
        );
        assert_eq!(
            api.users_url(Some("abc")).expect("url").as_str(),
            "http://localhost:5000/api/users/abc"
        );
    }

    #[test]
    fn trailing_slash_and_odd_ids_are_handled() {
        let api = HttpUsersApi::new("http://localhost/api/").expect("client");
        assert_eq!(
            api.users_url(Some("a/b c")).expect("url").as_str(),
            "http://localhost/api/users/a%2Fb%20c"
        );
        // The configured base itself is left untouched.
        assert_eq!(api.base_url().as_str(), "http://localhost/api/");
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(HttpUsersApi::new("not a url").is_err());
        assert!(HttpUsersApi::new("mailto:someone@example.com").is_err());
    }
}
