//! The [`HelpdeskBackend`] seam and its reqwest implementation.

use std::time::Duration;

use async_trait::async_trait;
use helpdesk_core::assignment::AssignmentAction;
use helpdesk_core::comment::Comment;
use helpdesk_core::metrics::{ChartType, DepartmentCount, MonthlyResolved, TicketCounts, TimeBucket};
use helpdesk_core::submission::NewTicketSubmission;
use helpdesk_core::ticket::BackendTicket;
use helpdesk_core::types::DbId;
use helpdesk_core::user::User;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::BackendConfig;
use crate::error::BackendError;
use crate::models::{
    CreatedTicket, NewComment, NewUser, UpdatePassword, UpdateStatus, UpdateUser,
};

/// Every backend operation the portal performs.
///
/// One method per backend endpoint. Implementations must be cheap to share
/// across request handlers.
#[async_trait]
pub trait HelpdeskBackend: Send + Sync {
    // ---- users ----

    /// `GET /users`
    async fn list_users(&self) -> Result<Vec<User>, BackendError>;
    /// `GET /users/{id}`
    async fn get_user(&self, id: DbId) -> Result<User, BackendError>;
    /// `POST /users`
    async fn create_user(&self, input: &NewUser) -> Result<(), BackendError>;
    /// `PUT /users/{id}`
    async fn update_user(&self, id: DbId, input: &UpdateUser) -> Result<(), BackendError>;
    /// `PUT /users/{id}/password`
    async fn update_password(&self, id: DbId, input: &UpdatePassword)
        -> Result<(), BackendError>;
    /// `DELETE /users/{id}`
    async fn delete_user(&self, id: DbId) -> Result<(), BackendError>;

    // ---- tickets ----

    /// `GET /tickets`
    async fn list_tickets(&self) -> Result<Vec<BackendTicket>, BackendError>;
    /// `GET /tickets/unassigned`
    async fn list_unassigned_tickets(&self) -> Result<Vec<BackendTicket>, BackendError>;
    /// `GET /tickets/assigned-to/{id}`
    async fn list_tickets_assigned_to(
        &self,
        user_id: DbId,
    ) -> Result<Vec<BackendTicket>, BackendError>;
    /// `GET /tickets/by-email/{email}`
    async fn list_tickets_by_email(&self, email: &str)
        -> Result<Vec<BackendTicket>, BackendError>;
    /// `GET /tickets/recent/latest`
    async fn recent_tickets(&self) -> Result<Vec<BackendTicket>, BackendError>;
    /// `POST /tickets`
    async fn create_ticket(
        &self,
        input: &NewTicketSubmission,
    ) -> Result<CreatedTicket, BackendError>;
    /// `PUT /tickets/{id}/assign`
    async fn assign_ticket(&self, ticket_id: DbId, user_id: DbId) -> Result<(), BackendError>;
    /// `PUT /tickets/{id}/reassign`
    async fn reassign_ticket(&self, ticket_id: DbId, user_id: DbId)
        -> Result<(), BackendError>;
    /// `PUT /tickets/{id}/status`
    async fn update_status(&self, ticket_id: DbId, status: &str) -> Result<(), BackendError>;

    /// Dispatch to exactly one of [`assign_ticket`](Self::assign_ticket) or
    /// [`reassign_ticket`](Self::reassign_ticket).
    async fn apply_assignment(
        &self,
        action: AssignmentAction,
        ticket_id: DbId,
        user_id: DbId,
    ) -> Result<(), BackendError> {
        match action {
            AssignmentAction::Assign => self.assign_ticket(ticket_id, user_id).await,
            AssignmentAction::Reassign => self.reassign_ticket(ticket_id, user_id).await,
        }
    }

    // ---- comments ----

    /// `GET /comments/{ticketId}`
    async fn list_comments(&self, ticket_id: DbId) -> Result<Vec<Comment>, BackendError>;
    /// `POST /comments`
    async fn add_comment(&self, input: &NewComment) -> Result<(), BackendError>;

    // ---- metrics ----

    /// `GET /tickets/metrics/counts`
    async fn ticket_counts(&self) -> Result<TicketCounts, BackendError>;
    /// `GET /tickets/metrics/monthly-resolved`
    async fn monthly_resolved(&self) -> Result<Vec<MonthlyResolved>, BackendError>;
    /// `GET /tickets/metrics/time-distribution?type=&status=`
    async fn time_distribution(
        &self,
        chart_type: ChartType,
        status: Option<&str>,
    ) -> Result<Vec<TimeBucket>, BackendError>;
    /// `GET /tickets/metrics/department-breakdown`
    async fn department_breakdown(&self) -> Result<Vec<DepartmentCount>, BackendError>;

    /// Cheap reachability probe used by the health endpoint.
    async fn ping(&self) -> Result<(), BackendError> {
        self.ticket_counts().await.map(|_| ())
    }
}

/// [`HelpdeskBackend`] over HTTP.
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl RestBackend {
    /// Build a client for the configured backend.
    ///
    /// Fails if the base URL does not parse or cannot carry a path.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Self::with_client(client, &config.base_url)
    }

    /// Build a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, BackendError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| BackendError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ---- private helpers ----

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, BackendError> {
        tracing::debug!(%url, "backend GET");
        let response = self.client.get(url).send().await?;
        Self::parse_response(response).await
    }

    /// Path segment and body both come from [`AssignmentAction`].
    async fn put_assignment(
        &self,
        action: AssignmentAction,
        ticket_id: DbId,
        user_id: DbId,
    ) -> Result<(), BackendError> {
        let id = ticket_id.to_string();
        let url = self.endpoint(&["tickets", &id, action.as_str()])?;
        self.send_json(Method::PUT, url, &action.payload(user_id))
            .await?;
        Ok(())
    }

    async fn send_json<B: Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<reqwest::Response, BackendError> {
        tracing::debug!(%method, %url, "backend request");
        let response = self.client.request(method, url).json(body).send().await?;
        Self::ensure_success(response).await
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or [`BackendError::Api`] with the body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), %body, "backend returned an error");
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

#[async_trait]
impl HelpdeskBackend for RestBackend {
    async fn list_users(&self) -> Result<Vec<User>, BackendError> {
        self.get(self.endpoint(&["users"])?).await
    }

    async fn get_user(&self, id: DbId) -> Result<User, BackendError> {
        let id = id.to_string();
        self.get(self.endpoint(&["users", &id])?).await
    }

    async fn create_user(&self, input: &NewUser) -> Result<(), BackendError> {
        self.send_json(Method::POST, self.endpoint(&["users"])?, input)
            .await?;
        Ok(())
    }

    async fn update_user(&self, id: DbId, input: &UpdateUser) -> Result<(), BackendError> {
        let id = id.to_string();
        self.send_json(Method::PUT, self.endpoint(&["users", &id])?, input)
            .await?;
        Ok(())
    }

    async fn update_password(
        &self,
        id: DbId,
        input: &UpdatePassword,
    ) -> Result<(), BackendError> {
        let id = id.to_string();
        self.send_json(Method::PUT, self.endpoint(&["users", &id, "password"])?, input)
            .await?;
        Ok(())
    }

    async fn delete_user(&self, id: DbId) -> Result<(), BackendError> {
        let id = id.to_string();
        let url = self.endpoint(&["users", &id])?;
        tracing::debug!(%url, "backend DELETE");
        let response = self.client.delete(url).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn list_tickets(&self) -> Result<Vec<BackendTicket>, BackendError> {
        self.get(self.endpoint(&["tickets"])?).await
    }

    async fn list_unassigned_tickets(&self) -> Result<Vec<BackendTicket>, BackendError> {
        self.get(self.endpoint(&["tickets", "unassigned"])?).await
    }

    async fn list_tickets_assigned_to(
        &self,
        user_id: DbId,
    ) -> Result<Vec<BackendTicket>, BackendError> {
        let id = user_id.to_string();
        self.get(self.endpoint(&["tickets", "assigned-to", &id])?)
            .await
    }

    async fn list_tickets_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<BackendTicket>, BackendError> {
        self.get(self.endpoint(&["tickets", "by-email", email])?)
            .await
    }

    async fn recent_tickets(&self) -> Result<Vec<BackendTicket>, BackendError> {
        self.get(self.endpoint(&["tickets", "recent", "latest"])?)
            .await
    }

    async fn create_ticket(
        &self,
        input: &NewTicketSubmission,
    ) -> Result<CreatedTicket, BackendError> {
        let response = self
            .send_json(Method::POST, self.endpoint(&["tickets"])?, input)
            .await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(CreatedTicket::default());
        }
        serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn assign_ticket(&self, ticket_id: DbId, user_id: DbId) -> Result<(), BackendError> {
        self.put_assignment(AssignmentAction::Assign, ticket_id, user_id)
            .await
    }

    async fn reassign_ticket(
        &self,
        ticket_id: DbId,
        user_id: DbId,
    ) -> Result<(), BackendError> {
        self.put_assignment(AssignmentAction::Reassign, ticket_id, user_id)
            .await
    }

    async fn update_status(&self, ticket_id: DbId, status: &str) -> Result<(), BackendError> {
        let id = ticket_id.to_string();
        let body = UpdateStatus {
            status: status.to_string(),
        };
        self.send_json(Method::PUT, self.endpoint(&["tickets", &id, "status"])?, &body)
            .await?;
        Ok(())
    }

    async fn list_comments(&self, ticket_id: DbId) -> Result<Vec<Comment>, BackendError> {
        let id = ticket_id.to_string();
        self.get(self.endpoint(&["comments", &id])?).await
    }

    async fn add_comment(&self, input: &NewComment) -> Result<(), BackendError> {
        self.send_json(Method::POST, self.endpoint(&["comments"])?, input)
            .await?;
        Ok(())
    }

    async fn ticket_counts(&self) -> Result<TicketCounts, BackendError> {
        self.get(self.endpoint(&["tickets", "metrics", "counts"])?)
            .await
    }

    async fn monthly_resolved(&self) -> Result<Vec<MonthlyResolved>, BackendError> {
        self.get(self.endpoint(&["tickets", "metrics", "monthly-resolved"])?)
            .await
    }

    async fn time_distribution(
        &self,
        chart_type: ChartType,
        status: Option<&str>,
    ) -> Result<Vec<TimeBucket>, BackendError> {
        let mut url = self.endpoint(&["tickets", "metrics", "time-distribution"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("type", chart_type.as_str());
            if let Some(status) = status {
                query.append_pair("status", status);
            }
        }
        self.get(url).await
    }

    async fn department_breakdown(&self) -> Result<Vec<DepartmentCount>, BackendError> {
        self.get(self.endpoint(&["tickets", "metrics", "department-breakdown"])?)
            .await
    }
}
