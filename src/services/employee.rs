use std::sync::Arc;

use log::{error, info, warn};

use crate::db::EmployeeStore;
use crate::errors::ServiceError;
use crate::models::employee::{Employee, EmployeeDraft, EmployeePayload};
use crate::utils::clock;
use crate::utils::validation::{Candidate, EmployeeValidator, FieldError};

/// Parse, validate, mutate and persist employees.
///
/// No retries and no caching: a store failure goes straight back to the
/// caller as [`ServiceError::Persistence`].
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
    validator: EmployeeValidator,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>, validator: EmployeeValidator) -> Self {
        Self { store, validator }
    }

    pub async fn create(&self, payload: EmployeePayload) -> Result<Employee, ServiceError> {
        let draft = self.check(Candidate::default().merge(payload))?;

        let employee = self.store.insert(&draft).await.map_err(|err| {
            error!("Could not insert employee: {}", err);
            ServiceError::persistence("Could not create employee")(err)
        })?;

        info!("Created employee {}", employee.id);
        Ok(employee)
    }

    /// Merges the payload over the stored record and validates the result as
    /// a whole, so a stored hire date that has since passed fails too.
    pub async fn update(
        &self,
        id: i64,
        payload: EmployeePayload,
    ) -> Result<Employee, ServiceError> {
        let mut employee = self.find_by_id(id).await?;
        let draft = self.check(Candidate::from_employee(&employee).merge(payload))?;

        employee.apply(draft);
        employee.updated_at = Some(clock::now());

        let updated = self.store.update(&employee).await.map_err(|err| {
            error!("Could not update employee {}: {}", id, err);
            ServiceError::persistence("Could not update employee")(err)
        })?;
        if !updated {
            return Err(ServiceError::NotFound);
        }

        info!("Updated employee {}", id);
        Ok(employee)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Employee, ServiceError> {
        self.store
            .find(id)
            .await
            .map_err(|err| {
                error!("Could not load employee {}: {}", id, err);
                ServiceError::persistence("Could not find employee")(err)
            })?
            .ok_or(ServiceError::NotFound)
    }

    /// Hard delete. `Ok(false)` means the store reported nothing removed.
    pub async fn remove(&self, id: i64) -> Result<bool, ServiceError> {
        let employee = self.find_by_id(id).await?;

        let removed = self.store.delete(&employee).await.map_err(|err| {
            error!("Could not delete employee {}: {}", id, err);
            ServiceError::persistence("Could not delete employee")(err)
        })?;

        info!("Deleted employee {}: {}", id, removed);
        Ok(removed)
    }

    pub async fn ping(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(err) => {
                warn!("Store ping failed: {}", err);
                false
            }
        }
    }

    /// Only the first error, in field order, reaches the caller.
    fn check(&self, candidate: Candidate) -> Result<EmployeeDraft, ServiceError> {
        self.validator
            .validate(&candidate, clock::today())
            .map_err(|errors| {
                let first = errors.into_iter().next().unwrap_or_else(unknown_error);
                warn!("Rejected employee payload: {}", first);
                ServiceError::Validation(first)
            })
    }
}

fn unknown_error() -> FieldError {
    FieldError {
        field: "employee",
        error: validator::ValidationError::new("invalid"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryEmployeeStore, StoreError};
    use crate::models::employee::SalaryValue;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use rust_decimal::Decimal;

    struct BrokenStore;

    #[async_trait]
    impl EmployeeStore for BrokenStore {
        async fn find(&self, _id: i64) -> Result<Option<Employee>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn insert(&self, _draft: &EmployeeDraft) -> Result<Employee, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn update(&self, _employee: &Employee) -> Result<bool, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn delete(&self, _employee: &Employee) -> Result<bool, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    fn service() -> EmployeeService {
        EmployeeService::new(Arc::new(MemoryEmployeeStore::new()), EmployeeValidator::new())
    }

    fn john() -> EmployeePayload {
        EmployeePayload {
            first_name: Some(Some("John".to_string())),
            last_name: Some(Some("Doe".to_string())),
            email: Some(Some("john.doe@test.test".to_string())),
            hire_date: Some(Some("2099-01-01".to_string())),
            salary: Some(Some(SalaryValue::Number("3000".to_string()))),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_leaves_updated_at_empty() {
        let service = service();
        let employee = service.create(john()).await.unwrap();

        assert!(employee.id > 0);
        assert_eq!(employee.updated_at, None);
        assert_eq!(service.find_by_id(employee.id).await.unwrap(), employee);
    }

    #[tokio::test]
    async fn create_surfaces_first_error_only() {
        let payload = EmployeePayload {
            first_name: Some(Some(String::new())),
            salary: Some(Some(SalaryValue::Number("1".to_string()))),
            ..john()
        };

        let err = service().create(payload).await.unwrap_err();

        assert_matches!(err, ServiceError::Validation(ref field) if field.field == "firstName");
        assert_eq!(err.to_string(), "field firstName: This value should not be blank.");
    }

    #[tokio::test]
    async fn update_merges_over_stored_values() {
        let service = service();
        let created = service.create(john()).await.unwrap();

        let payload = EmployeePayload {
            first_name: Some(Some("Jane".to_string())),
            salary: Some(Some(SalaryValue::Number("4000".to_string()))),
            ..Default::default()
        };
        let updated = service.update(created.id, payload).await.unwrap();

        assert_eq!(updated.first_name, "Jane");
        assert_eq!(updated.salary, Decimal::new(4000, 0));
        assert_eq!(updated.last_name, created.last_name);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn rejected_update_leaves_record_untouched() {
        let service = service();
        let created = service.create(john()).await.unwrap();

        let payload = EmployeePayload {
            salary: Some(Some(SalaryValue::Number("99".to_string()))),
            ..Default::default()
        };
        let err = service.update(created.id, payload).await.unwrap_err();

        assert_matches!(err, ServiceError::Validation(_));
        assert_eq!(service.find_by_id(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let service = service();

        assert_matches!(service.find_by_id(404).await, Err(ServiceError::NotFound));
        assert_matches!(
            service.update(404, EmployeePayload::default()).await,
            Err(ServiceError::NotFound)
        );
        assert_matches!(service.remove(404).await, Err(ServiceError::NotFound));
    }

    #[tokio::test]
    async fn remove_deletes_record() {
        let service = service();
        let created = service.create(john()).await.unwrap();

        assert!(service.remove(created.id).await.unwrap());
        assert_matches!(service.find_by_id(created.id).await, Err(ServiceError::NotFound));
    }

    #[tokio::test]
    async fn store_failures_become_persistence_errors() {
        let service = EmployeeService::new(Arc::new(BrokenStore), EmployeeValidator::new());

        let err = service.create(john()).await.unwrap_err();
        assert_matches!(err, ServiceError::Persistence { .. });
        assert_eq!(err.to_string(), "Could not create employee");

        assert_matches!(
            service.find_by_id(1).await,
            Err(ServiceError::Persistence { .. })
        );
        assert!(!service.ping().await);
    }
}
