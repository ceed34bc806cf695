use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use shared::{
    responses::ApiErrorResponse,
    types::{Employee, EmployeeInput},
};

use crate::{api::state::EmployeeAppState, error::EmployeeServiceError};

#[utoipa::path(
    get,
    path = "/api/v1/employee",
    tag = "Employees",
    operation_id = "list_employees",
    responses(
        (status = 200, description = "All employees", body = Vec<Employee>),
        (status = 502, description = "Upstream service error", body = ApiErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn find_all(
    State(state): State<Arc<EmployeeAppState>>,
) -> Result<Json<Vec<Employee>>, EmployeeServiceError> {
    let output = state.employee_service.get_all_employees().await?;
    Ok(Json(output))
}

#[utoipa::path(
    get,
    path = "/api/v1/employee/search/{fragment}",
    tag = "Employees",
    operation_id = "search_employees",
    params(
        ("fragment" = String, Path, description = "Case-insensitive part of the name")
    ),
    responses(
        (status = 200, description = "Employees whose name contains the fragment", body = Vec<Employee>),
        (status = 502, description = "Upstream service error", body = ApiErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn search_by_name(
    State(state): State<Arc<EmployeeAppState>>,
    Path(fragment): Path<String>,
) -> Result<Json<Vec<Employee>>, EmployeeServiceError> {
    let output = state.employee_service.search_by_name(&fragment).await?;
    Ok(Json(output))
}

#[utoipa::path(
    get,
    path = "/api/v1/employee/{id}",
    tag = "Employees",
    operation_id = "get_employee",
    params(
        ("id" = String, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = ApiErrorResponse),
        (status = 502, description = "Upstream service error", body = ApiErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn find_by_id(
    State(state): State<Arc<EmployeeAppState>>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, EmployeeServiceError> {
    let output = state.employee_service.get_by_id(&id).await?;
    Ok(Json(output))
}

#[utoipa::path(
    get,
    path = "/api/v1/employee/highestSalary",
    tag = "Employees",
    operation_id = "highest_salary",
    responses(
        (status = 200, description = "Highest salary, 0 when there are no employees", body = i64),
        (status = 502, description = "Upstream service error", body = ApiErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn highest_salary(
    State(state): State<Arc<EmployeeAppState>>,
) -> Result<Json<i64>, EmployeeServiceError> {
    let output = state.employee_service.get_highest_salary().await?;
    Ok(Json(output))
}

#[utoipa::path(
    get,
    path = "/api/v1/employee/topTenHighestEarningEmployeeNames",
    tag = "Employees",
    operation_id = "top_ten_highest_earning_names",
    responses(
        (status = 200, description = "Names of the ten best paid employees", body = Vec<String>),
        (status = 502, description = "Upstream service error", body = ApiErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn top_ten_highest_earning_names(
    State(state): State<Arc<EmployeeAppState>>,
) -> Result<Json<Vec<String>>, EmployeeServiceError> {
    let output = state
        .employee_service
        .get_top_ten_highest_earning_employee_names()
        .await?;
    Ok(Json(output))
}

#[utoipa::path(
    post,
    path = "/api/v1/employee",
    tag = "Employees",
    operation_id = "create_employee",
    request_body = EmployeeInput,
    responses(
        (status = 200, description = "Employee created", body = Employee),
        (status = 400, description = "Invalid input", body = ApiErrorResponse),
        (status = 500, description = "Upstream created nothing", body = ApiErrorResponse),
        (status = 502, description = "Upstream service error", body = ApiErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn create(
    State(state): State<Arc<EmployeeAppState>>,
    Json(input): Json<EmployeeInput>,
) -> Result<Json<Employee>, EmployeeServiceError> {
    input.validate().map_err(EmployeeServiceError::BadRequest)?;

    let output = state.employee_service.create_employee(input).await?;
    Ok(Json(output))
}

#[utoipa::path(
    delete,
    path = "/api/v1/employee/{id}",
    tag = "Employees",
    operation_id = "delete_employee",
    params(
        ("id" = String, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Deletion confirmation", body = String, content_type = "text/plain"),
        (status = 500, description = "Employee could not be deleted", body = ApiErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<EmployeeAppState>>,
    Path(id): Path<String>,
) -> Result<String, EmployeeServiceError> {
    state.employee_service.delete_employee_by_id(&id).await
}
