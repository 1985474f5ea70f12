#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use helpdesk_api::auth::jwt::{generate_access_token, JwtConfig};
use helpdesk_api::config::ServerConfig;
use helpdesk_api::notifications::Notifier;
use helpdesk_api::router::build_app_router;
use helpdesk_api::state::AppState;
use helpdesk_backend::models::{
    CreatedTicket, NewComment, NewUser, UpdatePassword, UpdateUser,
};
use helpdesk_backend::{BackendError, HelpdeskBackend};
use helpdesk_core::comment::Comment;
use helpdesk_core::metrics::{
    ChartType, DepartmentCount, MonthlyResolved, TicketCounts, TimeBucket,
};
use helpdesk_core::submission::NewTicketSubmission;
use helpdesk_core::ticket::BackendTicket;
use helpdesk_core::types::DbId;
use helpdesk_core::user::User;
use helpdesk_mail::{Address, EmailError, Mailer, OutgoingEmail};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

pub const TEST_JWT_SECRET: &str = "test-secret-for-integration-tests";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin and sends new-ticket
/// notifications to `helpdesk@example.com`.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        portal_url: "http://portal.test".to_string(),
        helpdesk_admin_email: Some("helpdesk@example.com".to_string()),
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

pub fn token_for(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).expect("token generation")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn user(id: DbId, name: &str, role: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        role: role.to_string(),
        department: None,
        phone: None,
    }
}

pub fn ticket(id: DbId, department: &str, status: &str) -> BackendTicket {
    BackendTicket {
        id,
        title: Some(format!("Ticket {id}")),
        name: Some("Visitor".to_string()),
        email: Some("visitor@example.com".to_string()),
        department: Some(department.to_string()),
        status: Some(status.to_string()),
        created_at: Some("2024-05-10T09:00:00Z".to_string()),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// Everything the fake backend serves, plus a log of the calls it received.
#[derive(Debug, Default)]
pub struct FakeData {
    pub users: Vec<User>,
    pub tickets: Vec<BackendTicket>,
    pub comments: Vec<Comment>,
    pub counts: TicketCounts,
    pub monthly: Vec<MonthlyResolved>,
    pub opened: Vec<TimeBucket>,
    pub resolved: Vec<TimeBucket>,
    pub departments: Vec<DepartmentCount>,
    pub created_users: Vec<NewUser>,
    pub created_tickets: Vec<NewTicketSubmission>,
    /// `"METHOD /path"` for every mutating call, in order.
    pub calls: Vec<String>,
    /// When set, every call fails with a 500 from the backend.
    pub down: bool,
}

#[derive(Debug, Default)]
pub struct FakeBackend {
    pub data: Mutex<FakeData>,
}

fn not_found() -> BackendError {
    BackendError::Api {
        status: 404,
        body: "Not found".to_string(),
    }
}

impl FakeBackend {
    pub fn new(data: FakeData) -> Arc<Self> {
        Arc::new(Self {
            data: Mutex::new(data),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.data.lock().unwrap().calls.clone()
    }

    fn read<T>(&self, f: impl FnOnce(&FakeData) -> T) -> Result<T, BackendError> {
        let data = self.data.lock().unwrap();
        if data.down {
            return Err(BackendError::Api {
                status: 500,
                body: "backend down".to_string(),
            });
        }
        Ok(f(&data))
    }

    fn write<T>(
        &self,
        call: String,
        f: impl FnOnce(&mut FakeData) -> Result<T, BackendError>,
    ) -> Result<T, BackendError> {
        let mut data = self.data.lock().unwrap();
        if data.down {
            return Err(BackendError::Api {
                status: 500,
                body: "backend down".to_string(),
            });
        }
        data.calls.push(call);
        f(&mut data)
    }

    fn set_assignee(data: &mut FakeData, ticket_id: DbId, user_id: DbId) -> Result<(), BackendError> {
        let ticket = data
            .tickets
            .iter_mut()
            .find(|t| t.id == ticket_id)
            .ok_or_else(not_found)?;
        ticket.assigned_to = Some(user_id);
        Ok(())
    }
}

#[async_trait]
impl HelpdeskBackend for FakeBackend {
    async fn list_users(&self) -> Result<Vec<User>, BackendError> {
        self.read(|d| d.users.clone())
    }

    async fn get_user(&self, id: DbId) -> Result<User, BackendError> {
        self.read(|d| d.users.iter().find(|u| u.id == id).cloned())?
            .ok_or_else(not_found)
    }

    async fn create_user(&self, input: &NewUser) -> Result<(), BackendError> {
        self.write("POST /users".to_string(), |d| {
            d.created_users.push(input.clone());
            Ok(())
        })
    }

    async fn update_user(&self, id: DbId, input: &UpdateUser) -> Result<(), BackendError> {
        self.write(format!("PUT /users/{id}"), |d| {
            let user = d.users.iter_mut().find(|u| u.id == id).ok_or_else(not_found)?;
            if let Some(name) = &input.name {
                user.name = name.clone();
            }
            if let Some(role) = &input.role {
                user.role = role.clone();
            }
            Ok(())
        })
    }

    async fn update_password(
        &self,
        id: DbId,
        _input: &UpdatePassword,
    ) -> Result<(), BackendError> {
        self.write(format!("PUT /users/{id}/password"), |_| Ok(()))
    }

    async fn delete_user(&self, id: DbId) -> Result<(), BackendError> {
        self.write(format!("DELETE /users/{id}"), |d| {
            let before = d.users.len();
            d.users.retain(|u| u.id != id);
            if d.users.len() == before {
                return Err(not_found());
            }
            Ok(())
        })
    }

    async fn list_tickets(&self) -> Result<Vec<BackendTicket>, BackendError> {
        self.read(|d| d.tickets.clone())
    }

    async fn list_unassigned_tickets(&self) -> Result<Vec<BackendTicket>, BackendError> {
        self.read(|d| {
            d.tickets
                .iter()
                .filter(|t| t.assigned_to.is_none())
                .cloned()
                .collect()
        })
    }

    async fn list_tickets_assigned_to(
        &self,
        user_id: DbId,
    ) -> Result<Vec<BackendTicket>, BackendError> {
        self.read(|d| {
            d.tickets
                .iter()
                .filter(|t| t.assigned_to == Some(user_id))
                .cloned()
                .collect()
        })
    }

    async fn list_tickets_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<BackendTicket>, BackendError> {
        self.read(|d| {
            d.tickets
                .iter()
                .filter(|t| t.email.as_deref() == Some(email))
                .cloned()
                .collect()
        })
    }

    async fn recent_tickets(&self) -> Result<Vec<BackendTicket>, BackendError> {
        self.read(|d| d.tickets.iter().rev().take(5).cloned().collect())
    }

    async fn create_ticket(
        &self,
        input: &NewTicketSubmission,
    ) -> Result<CreatedTicket, BackendError> {
        self.write("POST /tickets".to_string(), |d| {
            let id = d.tickets.iter().map(|t| t.id).max().unwrap_or(0) + 1;
            d.created_tickets.push(input.clone());
            d.tickets.push(BackendTicket {
                id,
                name: Some(input.name.clone()),
                title: Some(input.title.clone()),
                email: Some(input.email.clone()),
                details: Some(input.details.clone()),
                department: Some(input.department.clone()),
                category: Some(input.category.clone()),
                sub_category: Some(input.sub_category.clone()),
                status: Some("Pending".to_string()),
                ..Default::default()
            });
            Ok(CreatedTicket {
                id: Some(id),
                message: Some("Ticket created".to_string()),
            })
        })
    }

    async fn assign_ticket(&self, ticket_id: DbId, user_id: DbId) -> Result<(), BackendError> {
        self.write(format!("PUT /tickets/{ticket_id}/assign"), |d| {
            Self::set_assignee(d, ticket_id, user_id)
        })
    }

    async fn reassign_ticket(
        &self,
        ticket_id: DbId,
        user_id: DbId,
    ) -> Result<(), BackendError> {
        self.write(format!("PUT /tickets/{ticket_id}/reassign"), |d| {
            Self::set_assignee(d, ticket_id, user_id)
        })
    }

    async fn update_status(&self, ticket_id: DbId, status: &str) -> Result<(), BackendError> {
        self.write(format!("PUT /tickets/{ticket_id}/status"), |d| {
            let ticket = d
                .tickets
                .iter_mut()
                .find(|t| t.id == ticket_id)
                .ok_or_else(not_found)?;
            ticket.status = Some(status.to_string());
            Ok(())
        })
    }

    async fn list_comments(&self, ticket_id: DbId) -> Result<Vec<Comment>, BackendError> {
        self.read(|d| {
            d.comments
                .iter()
                .filter(|c| c.ticket_id == ticket_id)
                .cloned()
                .collect()
        })
    }

    async fn add_comment(&self, input: &NewComment) -> Result<(), BackendError> {
        self.write("POST /comments".to_string(), |d| {
            let id = d.comments.len() as DbId + 1;
            d.comments.push(Comment {
                id,
                ticket_id: input.ticket_id,
                content: input.content.clone(),
                is_admin: input.is_admin,
                author: None,
                created_at: "2024-05-11T10:00:00Z".to_string(),
            });
            Ok(())
        })
    }

    async fn ticket_counts(&self) -> Result<TicketCounts, BackendError> {
        self.read(|d| d.counts)
    }

    async fn monthly_resolved(&self) -> Result<Vec<MonthlyResolved>, BackendError> {
        self.read(|d| d.monthly.clone())
    }

    async fn time_distribution(
        &self,
        _chart_type: ChartType,
        status: Option<&str>,
    ) -> Result<Vec<TimeBucket>, BackendError> {
        self.read(|d| match status {
            Some(_) => d.resolved.clone(),
            None => d.opened.clone(),
        })
    }

    async fn department_breakdown(&self) -> Result<Vec<DepartmentCount>, BackendError> {
        self.read(|d| d.departments.clone())
    }
}

// ---------------------------------------------------------------------------
// Recording mailer
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Notifications go out on detached tasks; poll until `count` arrived.
    pub async fn wait_for(&self, count: usize) -> Vec<OutgoingEmail> {
        for _ in 0..100 {
            let sent = self.sent();
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.sent()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router over the fake backend.
///
/// Uses [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses. Email is disabled when `mailer` is `None`.
pub fn build_test_app(backend: Arc<FakeBackend>, mailer: Option<Arc<RecordingMailer>>) -> Router {
    let config = test_config();
    let notifier = match mailer {
        Some(mailer) => Notifier::new(
            mailer,
            Address::new("Helpdesk System", "noreply@helpdesk.local"),
        ),
        None => Notifier::disabled(),
    };

    let state = AppState {
        config: Arc::new(config.clone()),
        backend,
        notifier,
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
