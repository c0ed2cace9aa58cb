use std::collections::HashMap;
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://api.oj.nctu.me";
pub const DEFAULT_WEB_BASE: &str = "https://oj.nctu.me";

/// Upper bound the original client passed to the submissions endpoint so a
/// single page covers the whole history.
pub const DEFAULT_FETCH_COUNT: u32 = 1_048_576;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {source}")]
    Build {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("token is not a valid cookie value")]
    InvalidToken,

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

// FOJ wraps every payload in {"msg": ...}.
#[derive(Clone, Debug, Deserialize)]
struct Envelope<T> {
    msg: T,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GroupUser {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Submission {
    pub id: u64,
    pub user_id: u64,
    pub verdict_id: u32,
}

#[derive(Clone, Debug, Deserialize)]
struct SubmissionPage {
    submissions: Vec<Submission>,
}

#[derive(Clone, Debug)]
pub struct ClientOptions {
    pub api_base: String,
    pub token: String,
    pub timeout_seconds: usize,
    pub proxy: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token: String::new(),
            timeout_seconds: 10,
            proxy: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct OnlineJudge {
    client: reqwest::Client,
    api_base: String,
}

impl OnlineJudge {
    pub fn new(options: &ClientOptions) -> Result<Self, ClientError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:95.0) Gecko/20100101 Firefox/95.0",
            ),
        );
        let cookie = format!("token={}", options.token.trim());
        let cookie = reqwest::header::HeaderValue::from_str(&cookie)
            .map_err(|_| ClientError::InvalidToken)?;
        headers.insert(reqwest::header::COOKIE, cookie);

        let timeout = Duration::from_secs(options.timeout_seconds.try_into().unwrap_or(10));
        let builder = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(timeout);
        let builder = match options.proxy.as_deref() {
            Some(proxy) if !proxy.trim().is_empty() => {
                let proxy_url = proxy.to_string();
                let proxy =
                    reqwest::Proxy::all(proxy).map_err(|e| ClientError::ProxySetup {
                        proxy: proxy_url,
                        source: e,
                    })?;
                builder.proxy(proxy)
            }
            _ => builder,
        };
        let client = builder
            .build()
            .map_err(|e| ClientError::Build { source: e })?;

        Ok(Self {
            client,
            api_base: options.api_base.trim_end_matches('/').to_string(),
        })
    }

    async fn get_text(&self, url: &str) -> Result<String, ClientError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Request {
                url: url.to_string(),
                source: e,
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        resp.text().await.map_err(|e| ClientError::Request {
            url: url.to_string(),
            source: e,
        })
    }

    /// Fetch the member list of a contest group.
    pub async fn group_users(&self, group_id: u64) -> Result<Vec<GroupUser>, ClientError> {
        let url = format!("{}/groups/{}/users/", self.api_base, group_id);
        let body = self.get_text(&url).await?;
        let envelope: Envelope<Vec<GroupUser>> =
            serde_json::from_str(&body).map_err(|e| ClientError::Decode { url, source: e })?;
        Ok(envelope.msg)
    }

    /// Fetch the submission history for one problem, oldest first. The API
    /// returns newest first; replay order matters to the aggregation, so the
    /// page is reversed here.
    pub async fn submissions(
        &self,
        group_id: u64,
        problem_id: u64,
        count: u32,
    ) -> Result<Vec<Submission>, ClientError> {
        let url = format!(
            "{}/submissions/?group_id={}&problem_id={}&count={}",
            self.api_base, group_id, problem_id, count
        );
        let body = self.get_text(&url).await?;
        let envelope: Envelope<SubmissionPage> =
            serde_json::from_str(&body).map_err(|e| ClientError::Decode { url, source: e })?;
        let mut submissions = envelope.msg.submissions;
        submissions.reverse();
        Ok(submissions)
    }
}

/// Build the user_id -> contestant name map, keeping only names accepted by
/// the filter (the hosted scoreboard restricted rows to 7-digit student ids).
pub fn roster(users: &[GroupUser], name_filter: Option<&Regex>) -> HashMap<u64, String> {
    let mut out = HashMap::new();
    for user in users {
        let name = user.name.trim();
        if name.is_empty() {
            continue;
        }
        if let Some(re) = name_filter {
            if !re.is_match(name) {
                continue;
            }
        }
        out.insert(user.id, name.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_users_envelope_decodes() {
        let body = r#"{"msg": [{"id": 7, "name": "0416001"}, {"id": 9, "name": "ta-alice"}]}"#;
        let envelope: Envelope<Vec<GroupUser>> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.msg.len(), 2);
        assert_eq!(envelope.msg[0].id, 7);
        assert_eq!(envelope.msg[1].name, "ta-alice");
    }

    #[test]
    fn submission_envelope_tolerates_extra_fields() {
        let body = r#"{"msg": {"submissions": [
            {"id": 31, "user_id": 7, "verdict_id": 10, "problem_id": 714, "length": 1312}
        ], "count": 1}}"#;
        let envelope: Envelope<SubmissionPage> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.msg.submissions[0].verdict_id, 10);
    }

    #[test]
    fn roster_applies_name_filter() {
        let users = vec![
            GroupUser {
                id: 1,
                name: "0416001".to_string(),
            },
            GroupUser {
                id: 2,
                name: "ta-alice".to_string(),
            },
            GroupUser {
                id: 3,
                name: "  ".to_string(),
            },
        ];
        let re = Regex::new(r"^\d{7}$").unwrap();
        let map = roster(&users, Some(&re));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1).map(String::as_str), Some("0416001"));

        let all = roster(&users, None);
        assert_eq!(all.len(), 2);
    }
}
