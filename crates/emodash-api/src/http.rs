//! HTTP implementation of the store gateway.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{
    Created, Email, EmailId, EmailPatch, EmailQuery, MoodEntry, MoodSummary, NewMoodEntry,
    NewTask, OutgoingEmail, RecentSample, Suggestion, Task, TaskId, TaskPatch,
};
use crate::store::RemoteStore;

/// Gateway speaking JSON over HTTP to the dashboard backend.
#[derive(Debug, Clone)]
pub struct HttpStore {
    base: Url,
    http_client: Client,
}

impl HttpStore {
    /// Creates a gateway rooted at `base_url`. Requests have no timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            base,
            http_client: Client::new(),
        })
    }

    /// Applies a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http_client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// The normalized base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }

    fn day_params(date: NaiveDate, tz_offset_min: i32) -> [(&'static str, String); 2] {
        [
            ("date", date.format("%Y-%m-%d").to_string()),
            ("tz_offset_min", tz_offset_min.to_string()),
        ]
    }
}

/// Fails with the status and body if the response is not a success.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::status(status.as_u16(), &body))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = check_status(response).await?.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn read_empty(response: Response) -> Result<()> {
    check_status(response).await?;
    Ok(())
}

impl RemoteStore for HttpStore {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let response = self.http_client.get(self.url("api/tasks")?).send().await?;
        read_json(response).await
    }

    async fn create_task(&self, task: &NewTask) -> Result<TaskId> {
        let response = self
            .http_client
            .post(self.url("api/tasks")?)
            .json(task)
            .send()
            .await?;
        let created: Created<TaskId> = read_json(response).await?;
        debug!(id = %created.id, "task created");
        Ok(created.id)
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<()> {
        let response = self
            .http_client
            .patch(self.url(&format!("api/tasks/{id}"))?)
            .json(patch)
            .send()
            .await?;
        read_empty(response).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        let response = self
            .http_client
            .delete(self.url(&format!("api/tasks/{id}"))?)
            .send()
            .await?;
        read_empty(response).await
    }

    async fn list_emails(&self, query: EmailQuery) -> Result<Vec<Email>> {
        let response = self
            .http_client
            .get(self.url("api/emails")?)
            .query(&query.pairs())
            .send()
            .await?;
        read_json(response).await
    }

    async fn save_draft(&self, draft: &OutgoingEmail) -> Result<EmailId> {
        let response = self
            .http_client
            .post(self.url("api/emails/draft")?)
            .json(draft)
            .send()
            .await?;
        let created: Created<EmailId> = read_json(response).await?;
        debug!(id = %created.id, "draft saved");
        Ok(created.id)
    }

    async fn send_email(&self, message: &OutgoingEmail) -> Result<EmailId> {
        let response = self
            .http_client
            .post(self.url("api/emails/send")?)
            .json(message)
            .send()
            .await?;
        let created: Created<EmailId> = read_json(response).await?;
        debug!(id = %created.id, "email sent");
        Ok(created.id)
    }

    async fn update_email(&self, id: EmailId, patch: &EmailPatch) -> Result<()> {
        let response = self
            .http_client
            .patch(self.url(&format!("api/emails/{id}"))?)
            .json(patch)
            .send()
            .await?;
        read_empty(response).await
    }

    async fn delete_email(&self, id: EmailId) -> Result<()> {
        let response = self
            .http_client
            .delete(self.url(&format!("api/emails/{id}"))?)
            .send()
            .await?;
        read_empty(response).await
    }

    async fn recent_mood_samples(&self) -> Result<Vec<RecentSample>> {
        let response = self.http_client.get(self.url("groq_results")?).send().await?;
        read_json(response).await
    }

    async fn current_suggestion(&self) -> Result<Suggestion> {
        let response = self
            .http_client
            .get(self.url("groq_suggestion")?)
            .send()
            .await?;
        read_json(response).await
    }

    async fn mood_entries(&self, date: NaiveDate, tz_offset_min: i32) -> Result<Vec<MoodEntry>> {
        let response = self
            .http_client
            .get(self.url("mood_entries")?)
            .query(&Self::day_params(date, tz_offset_min))
            .send()
            .await?;
        read_json(response).await
    }

    async fn log_mood(&self, entry: &NewMoodEntry) -> Result<()> {
        let response = self
            .http_client
            .post(self.url("log_mood")?)
            .json(entry)
            .send()
            .await?;
        read_empty(response).await
    }

    async fn mood_summary(&self, date: NaiveDate, tz_offset_min: i32) -> Result<MoodSummary> {
        let response = self
            .http_client
            .get(self.url("mood_summary")?)
            .query(&Self::day_params(date, tz_offset_min))
            .send()
            .await?;
        read_json(response).await
    }
}
