pub mod dashboard;
pub mod emails;
pub mod health;
pub mod public;
pub mod tickets;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /form-options                                    submission dropdowns (public)
/// /track                                           tickets by email (public)
/// /track/{ticket_id}/comments                      visitor comment (public, POST)
///
/// /me/navigation                                   sidebar + quick actions (auth required)
///
/// /tickets                                         submit (public, POST)
/// /tickets/view                                    filtered ticket table (staff)
/// /tickets/unassigned                              unassigned tickets (assigners)
/// /tickets/assigned                                assigned tickets (assigners)
/// /tickets/{id}/status                             change status (staff, PUT)
/// /tickets/{id}/comments                           list, add (staff)
/// /tickets/{id}/assignment                         assign or reassign (assigners, POST)
/// /tickets/{id}/assign                             assign (assigners, PUT)
/// /tickets/{id}/reassign                           reassign (assigners, PUT)
///
/// /users                                           list (assigners), create (GM)
/// /users/{id}                                      update, delete (management)
/// /users/{id}/password                             change password (management, PUT)
///
/// /dashboard/metrics                               headline counters (management)
/// /dashboard/monthly-resolved                      resolved per month
/// /dashboard/statistics                            opened vs resolved per period
/// /dashboard/departments                           tickets per department
/// /dashboard/recent                                latest tickets
/// /dashboard/export.xlsx                           spreadsheet download
/// /dashboard/charts/monthly.svg                    monthly bar chart
/// /dashboard/charts/statistics.svg                 opened vs resolved area chart
/// /dashboard/charts/departments.svg                department bar chart
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Public submission and tracking.
        .merge(public::router())
        // Role-filtered navigation for the signed-in user.
        .route("/me/navigation", get(handlers::navigation::me_navigation))
        // Tickets, comments and assignment.
        .nest("/tickets", tickets::router())
        // Staff accounts.
        .nest("/users", users::router())
        // Management dashboard.
        .nest("/dashboard", dashboard::router())
}
