use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;
use shared::{CreatePollInput, payload};

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct CreatePollData {
    #[serde(rename = "createPoll")]
    create_poll: CreatedPoll,
}

#[derive(Debug, Deserialize)]
struct CreatedPoll {
    id: String,
}

#[derive(Debug, Deserialize)]
struct PollData {
    poll: Option<Poll>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Poll {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<String>,
    pub color: Vec<i32>,
    pub randomize: bool,
    pub protection: String,
}

impl<T> GraphQlResponse<T> {
    pub fn into_result(self) -> anyhow::Result<T> {
        if !self.errors.is_empty() {
            let messages: Vec<String> = self.errors.into_iter().map(|e| e.message).collect();
            anyhow::bail!("GraphQL error: {}", messages.join("; "));
        }
        self.data
            .ok_or_else(|| anyhow::anyhow!("GraphQL response has no data"))
    }
}

pub struct Api {
    client: reqwest::Client,
    endpoint: String,
}

impl Api {
    pub fn new(backend_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/graphql", backend_url.trim_end_matches('/')),
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> anyhow::Result<T> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            anyhow::bail!("API error ({}): {}", status, text);
        }

        response.json::<GraphQlResponse<T>>().await?.into_result()
    }

    /// Returns the id of the new poll.
    pub async fn create_poll(&self, input: &CreatePollInput) -> anyhow::Result<String> {
        let data: CreatePollData = self
            .execute(payload::CREATE_POLL, json!({ "input": input }))
            .await?;
        Ok(data.create_poll.id)
    }

    pub async fn poll(&self, id: &str) -> anyhow::Result<Option<Poll>> {
        let data: PollData = self.execute(payload::POLL, json!({ "id": id })).await?;
        Ok(data.poll)
    }
}
