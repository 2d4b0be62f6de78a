use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{EmployeeStore, StoreError};
use crate::models::employee::{Employee, EmployeeDraft};
use crate::utils::clock;

/// Process-local store used when no database is configured.
///
/// Ids come from a counter that only moves forward, so a deleted id is
/// never handed out again.
#[derive(Default)]
pub struct MemoryEmployeeStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    last_id: i64,
    rows: BTreeMap<i64, Employee>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn find(&self, id: i64) -> Result<Option<Employee>, StoreError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn insert(&self, draft: &EmployeeDraft) -> Result<Employee, StoreError> {
        let mut state = self.lock()?;
        state.last_id += 1;
        let employee = Employee {
            id: state.last_id,
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            hire_date: draft.hire_date,
            salary: draft.salary,
            created_at: clock::now(),
            updated_at: None,
        };
        state.rows.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn update(&self, employee: &Employee) -> Result<bool, StoreError> {
        let mut state = self.lock()?;
        match state.rows.get_mut(&employee.id) {
            Some(row) => {
                *row = Employee {
                    created_at: row.created_at,
                    ..employee.clone()
                };
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, employee: &Employee) -> Result<bool, StoreError> {
        Ok(self.lock()?.rows.remove(&employee.id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.lock().map(|_| ())
    }
}
