use std::error::Error;

use reqwest::StatusCode;
use serde::Serialize;
use todo_auth::CONNECTION_TOKEN_TYPE;

pub struct ApiClient {
    pub url: String,
}

impl ApiClient {
    fn path(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.url)
    }

    async fn read(response: reqwest::Response) -> Result<(StatusCode, serde_json::Value), Box<dyn Error>> {
        let status = response.status();
        let text = response.text().await?;
        let body = if text.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text)?
        };
        Ok((status, body))
    }

    pub async fn get(
        &self,
        client: &reqwest::Client,
        endpoint: &str,
        token: Option<&str>,
    ) -> Result<(StatusCode, serde_json::Value), Box<dyn Error>> {
        let mut request = client.get(self.path(endpoint));
        if let Some(token) = token {
            request = request.header("authorization", format!("{CONNECTION_TOKEN_TYPE} {token}"));
        }
        Self::read(request.send().await?).await
    }

    pub async fn get_with_header(
        &self,
        client: &reqwest::Client,
        endpoint: &str,
        authorization: &str,
    ) -> Result<(StatusCode, serde_json::Value), Box<dyn Error>> {
        let response = client
            .get(self.path(endpoint))
            .header("authorization", authorization)
            .send()
            .await?;
        Self::read(response).await
    }

    pub async fn post<T: Serialize>(
        &self,
        client: &reqwest::Client,
        endpoint: &str,
        body: &T,
        token: Option<&str>,
    ) -> Result<(StatusCode, serde_json::Value), Box<dyn Error>> {
        let mut request = client
            .post(self.path(endpoint))
            .header("content-type", "application/json")
            .body(serde_json::to_string(body)?);
        if let Some(token) = token {
            request = request.header("authorization", format!("{CONNECTION_TOKEN_TYPE} {token}"));
        }
        Self::read(request.send().await?).await
    }

    pub async fn post_raw(
        &self,
        client: &reqwest::Client,
        endpoint: &str,
        body: &str,
    ) -> Result<(StatusCode, serde_json::Value), Box<dyn Error>> {
        let response = client
            .post(self.path(endpoint))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await?;
        Self::read(response).await
    }
}
