use std::sync::Arc;

use shared::types::{Employee, EmployeeInput};

use crate::domain::aggregation;
use crate::domain::client::EmployeeClient;
use crate::error::EmployeeServiceError;

/// How many names the top-earners query returns.
pub const TOP_EARNERS_LIMIT: usize = 10;

/// The caller-facing employee operations.
///
/// Holds no state besides the client: every derived query re-fetches the full
/// listing from upstream.
pub struct EmployeeService {
    client: Arc<dyn EmployeeClient>,
}

impl EmployeeService {
    pub fn new(client: Arc<dyn EmployeeClient>) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all_employees(&self) -> Result<Vec<Employee>, EmployeeServiceError> {
        self.client.list_all().await
    }

    #[tracing::instrument(skip(self))]
    pub async fn search_by_name(
        &self,
        fragment: &str,
    ) -> Result<Vec<Employee>, EmployeeServiceError> {
        let employees = self.client.list_all().await?;
        let matches = aggregation::search_by_name(employees, fragment);
        tracing::debug!(count = matches.len(), "Name search finished");
        Ok(matches)
    }

    /// Absent data, and an upstream 404, both mean there is no such employee.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Employee, EmployeeServiceError> {
        match self.client.get_by_id(id).await {
            Ok(Some(employee)) => Ok(employee),
            Ok(None) => {
                tracing::warn!(%id, "Employee not found");
                Err(not_found(id))
            }
            Err(EmployeeServiceError::Upstream(fault)) if fault.status == Some(404) => {
                tracing::warn!(%id, "Upstream reported employee as missing");
                Err(not_found(id))
            }
            Err(e) => Err(e),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_highest_salary(&self) -> Result<i64, EmployeeServiceError> {
        let employees = self.client.list_all().await?;
        Ok(aggregation::highest_salary(&employees))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_top_ten_highest_earning_employee_names(
        &self,
    ) -> Result<Vec<String>, EmployeeServiceError> {
        let employees = self.client.list_all().await?;
        Ok(aggregation::top_n_earners(employees, TOP_EARNERS_LIMIT))
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_employee(
        &self,
        input: EmployeeInput,
    ) -> Result<Employee, EmployeeServiceError> {
        let name = input.name.clone();
        let created = self.client.create(input).await?.ok_or_else(|| {
            tracing::warn!(%name, "Upstream returned no employee after create");
            EmployeeServiceError::CreationFailed(format!("Failed to create employee {name}"))
        })?;

        tracing::info!(id = %created.id, "Employee created");
        Ok(created)
    }

    /// Returns a confirmation message. A `false` answer, an empty answer and an
    /// upstream fault all end up as [`EmployeeServiceError::DeletionFailed`].
    #[tracing::instrument(skip(self))]
    pub async fn delete_employee_by_id(&self, id: &str) -> Result<String, EmployeeServiceError> {
        match self.client.delete_by_id(id).await {
            Ok(Some(true)) => {
                tracing::info!(%id, "Employee deleted");
                Ok(format!("Employee with id {id} deleted successfully"))
            }
            Ok(answer) => {
                tracing::warn!(%id, ?answer, "Upstream did not confirm deletion");
                Err(EmployeeServiceError::DeletionFailed(format!(
                    "Failed to delete employee with id {id}"
                )))
            }
            Err(e) => Err(EmployeeServiceError::DeletionFailed(format!(
                "Failed to delete employee with id {id}: {e}"
            ))),
        }
    }
}

fn not_found(id: &str) -> EmployeeServiceError {
    EmployeeServiceError::NotFound(format!("Employee with id {id} not found"))
}
