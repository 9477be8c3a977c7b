use crate::types::ErrorBody;
use crate::{
    ClientConfig, ClientError, ClientResult, DetailedPermissions, EnforceResponse, GroupingChange,
    HealthStatus, Policies, PolicyChange, UserPermissions,
};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use warden_authz::{EnforceRequest, GroupingRule, PermissionMap, PolicyRule};

/// Typed wrapper over the policy server's HTTP API.
#[derive(Debug, Clone)]
pub struct WardenClient {
    http: reqwest::Client,
    base_url: Url,
}

impl WardenClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Self::from_parts(http, &config.base_url)
    }

    pub fn from_parts(http: reqwest::Client, base_url: &str) -> ClientResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|err| ClientError::InvalidBaseUrl(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn health(&self) -> ClientResult<HealthStatus> {
        let response = self.http.get(self.endpoint(&["health"])?).send().await?;
        decode(response).await
    }

    /// Objects grouped by action, including grants inherited through roles.
    pub async fn permission_map(&self, user: &str) -> ClientResult<PermissionMap> {
        let response = self
            .http
            .get(self.endpoint(&["casbin", user])?)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn detailed(&self, user: &str) -> ClientResult<DetailedPermissions> {
        let response = self
            .http
            .get(self.endpoint(&["casbin", user, "detailed"])?)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn user_permissions(&self, user: &str) -> ClientResult<UserPermissions> {
        let response = self
            .http
            .get(self.endpoint(&["casbin", "permissions", user])?)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn enforce(&self, request: &EnforceRequest) -> ClientResult<EnforceResponse> {
        let response = self
            .http
            .post(self.endpoint(&["casbin", "enforce"])?)
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn policies(&self) -> ClientResult<Policies> {
        let response = self
            .http
            .get(self.endpoint(&["casbin", "policies"])?)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn add_policy(&self, rule: &PolicyRule) -> ClientResult<PolicyChange> {
        let response = self
            .http
            .post(self.endpoint(&["casbin", "add-policy"])?)
            .json(rule)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn remove_policy(&self, rule: &PolicyRule) -> ClientResult<PolicyChange> {
        let response = self
            .http
            .delete(self.endpoint(&["casbin", "remove-policy"])?)
            .json(rule)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn add_grouping(&self, rule: &GroupingRule) -> ClientResult<GroupingChange> {
        let response = self
            .http
            .post(self.endpoint(&["casbin", "add-grouping"])?)
            .json(rule)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn remove_grouping(&self, rule: &GroupingRule) -> ClientResult<GroupingChange> {
        let response = self
            .http
            .delete(self.endpoint(&["casbin", "remove-grouping"])?)
            .json(rule)
            .send()
            .await?;
        decode(response).await
    }

    // Segments are percent-encoded, so user names cannot escape their slot.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    tracing::debug!(status = status.as_u16(), %message, "policy server error");
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
