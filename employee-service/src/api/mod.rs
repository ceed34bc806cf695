use std::sync::Arc;

use axum::{Router, routing::get};

pub mod handler;
pub mod state;

use handler::employee;
use state::EmployeeAppState;

/// Employee routes, mounted under `/api/v1/employee`.
pub fn routes(state: Arc<EmployeeAppState>) -> Router {
    Router::new()
        .route(
            "/api/v1/employee",
            get(employee::find_all).post(employee::create),
        )
        .route(
            "/api/v1/employee/search/{fragment}",
            get(employee::search_by_name),
        )
        .route(
            "/api/v1/employee/highestSalary",
            get(employee::highest_salary),
        )
        .route(
            "/api/v1/employee/topTenHighestEarningEmployeeNames",
            get(employee::top_ten_highest_earning_names),
        )
        .route(
            "/api/v1/employee/{id}",
            get(employee::find_by_id).delete(employee::delete),
        )
        .with_state(state)
}
