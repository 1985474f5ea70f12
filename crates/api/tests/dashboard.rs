//! Integration tests for the management dashboard.

mod common;

use axum::http::{header, StatusCode};
use common::{body_bytes, body_json, get_auth, ticket, token_for, user, FakeBackend, FakeData};
use helpdesk_core::metrics::{DepartmentCount, MonthlyResolved, TicketCounts, TimeBucket};

fn bucket(month: u32, count: i64) -> TimeBucket {
    TimeBucket {
        month: Some(month),
        quarter: None,
        year: 2024,
        ticket_count: count,
    }
}

fn dashboard_data() -> FakeData {
    FakeData {
        users: vec![user(1, "Grace", "GM"), user(2, "Ade", "Admin")],
        tickets: vec![ticket(1, "IT", "Open"), ticket(2, "HR", "Resolved")],
        counts: TicketCounts {
            total_tickets: 10,
            resolved_tickets: 4,
        },
        monthly: vec![
            MonthlyResolved {
                month: 3,
                resolved_count: 5,
            },
            MonthlyResolved {
                month: 11,
                resolved_count: 2,
            },
        ],
        opened: vec![bucket(1, 6), bucket(2, 3)],
        resolved: vec![bucket(2, 1)],
        departments: vec![
            DepartmentCount {
                department: "IT".into(),
                ticket_count: 7,
            },
            DepartmentCount {
                department: "HR".into(),
                ticket_count: 3,
            },
        ],
        ..Default::default()
    }
}

fn manager() -> String {
    token_for(1, "Manager")
}

// ---------------------------------------------------------------------------
// Test: metric endpoints
// ---------------------------------------------------------------------------

#[tokio::test]
async fn metrics_include_open_tickets() {
    let app = common::build_test_app(FakeBackend::new(dashboard_data()), None);

    let response = get_auth(app, "/api/v1/dashboard/metrics", &manager()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["totalTickets"], 10);
    assert_eq!(json["data"]["resolvedTickets"], 4);
    assert_eq!(json["data"]["openTickets"], 6);
}

#[tokio::test]
async fn monthly_resolved_has_twelve_points() {
    let app = common::build_test_app(FakeBackend::new(dashboard_data()), None);

    let response = get_auth(app, "/api/v1/dashboard/monthly-resolved", &manager()).await;

    let json = body_json(response).await;
    let points = json["data"].as_array().unwrap();
    assert_eq!(points.len(), 12);
    assert_eq!(points[0]["month"], "Jan");
    assert_eq!(points[0]["resolved"], 0);
    assert_eq!(points[2]["resolved"], 5);
    assert_eq!(points[10]["resolved"], 2);
}

#[tokio::test]
async fn statistics_merge_opened_and_resolved() {
    let app = common::build_test_app(FakeBackend::new(dashboard_data()), None);

    let response = get_auth(app, "/api/v1/dashboard/statistics?type=monthly", &manager()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["data"],
        serde_json::json!([
            { "label": "Jan 2024", "opened": 6, "resolved": 0 },
            { "label": "Feb 2024", "opened": 3, "resolved": 1 },
        ])
    );
}

#[tokio::test]
async fn statistics_reject_unknown_type() {
    let app = common::build_test_app(FakeBackend::new(dashboard_data()), None);

    let response = get_auth(app, "/api/v1/dashboard/statistics?type=weekly", &manager()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn departments_are_passed_through() {
    let app = common::build_test_app(FakeBackend::new(dashboard_data()), None);

    let response = get_auth(app, "/api/v1/dashboard/departments", &manager()).await;

    let json = body_json(response).await;
    assert_eq!(json["data"][0]["department"], "IT");
    assert_eq!(json["data"][0]["ticketCount"], 7);
}

#[tokio::test]
async fn recent_lists_newest_first() {
    let app = common::build_test_app(FakeBackend::new(dashboard_data()), None);

    let response = get_auth(app, "/api/v1/dashboard/recent", &manager()).await;

    let json = body_json(response).await;
    let tickets = json["data"].as_array().unwrap();
    assert_eq!(tickets.len(), 2);
    assert_eq!(tickets[0]["id"], 2);
}

// ---------------------------------------------------------------------------
// Test: export and charts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn export_is_an_xlsx_attachment() {
    let app = common::build_test_app(FakeBackend::new(dashboard_data()), None);

    let response = get_auth(app, "/api/v1/dashboard/export.xlsx", &manager()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"all_tickets.xlsx\""
    );
    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn charts_are_svg() {
    for path in [
        "/api/v1/dashboard/charts/monthly.svg",
        "/api/v1/dashboard/charts/statistics.svg?type=monthly&width=640",
        "/api/v1/dashboard/charts/departments.svg",
    ] {
        let app = common::build_test_app(FakeBackend::new(dashboard_data()), None);
        let response = get_auth(app, path, &manager()).await;

        assert_eq!(response.status(), StatusCode::OK, "{path}");
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(body.starts_with("<svg"), "{path}");
    }
}

#[tokio::test]
async fn statistics_chart_rejects_non_finite_width() {
    for width in ["NaN", "inf", "-inf"] {
        let backend = FakeBackend::new(dashboard_data());
        let app = common::build_test_app(backend, None);
        let uri = format!("/api/v1/dashboard/charts/statistics.svg?width={width}");

        let response = get_auth(app, &uri, &token_for(1, "GM")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{width}");
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(!body.contains("NaN"), "{width}");
    }
}

// ---------------------------------------------------------------------------
// Test: backend failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn backend_outage_is_bad_gateway() {
    let mut data = dashboard_data();
    data.down = true;
    let app = common::build_test_app(FakeBackend::new(data), None);

    let response = get_auth(app, "/api/v1/dashboard/metrics", &manager()).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "BACKEND_ERROR");
}
