use async_trait::async_trait;
use shared::types::{Employee, EmployeeInput};

use crate::error::EmployeeServiceError;

/// One round trip per call against the upstream employee service.
///
/// `None` means the upstream answered without a payload. Transport and protocol
/// problems come back as [`EmployeeServiceError::Upstream`].
#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait]
pub trait EmployeeClient: Send + Sync {
    /// An empty body yields an empty list, never `None`.
    async fn list_all(&self) -> Result<Vec<Employee>, EmployeeServiceError>;
    async fn get_by_id(&self, id: &str) -> Result<Option<Employee>, EmployeeServiceError>;
    async fn create(&self, input: EmployeeInput) -> Result<Option<Employee>, EmployeeServiceError>;
    async fn delete_by_id(&self, id: &str) -> Result<Option<bool>, EmployeeServiceError>;
}
