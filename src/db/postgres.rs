use async_trait::async_trait;
use sqlx::PgPool;

use super::{EmployeeStore, StoreError};
use crate::models::employee::{Employee, EmployeeDraft};
use crate::utils::clock;

const COLUMNS: &str =
    "id, first_name, last_name, email, hire_date, salary, created_at, updated_at";

#[derive(Clone)]
pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn find(&self, id: i64) -> Result<Option<Employee>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        let employee = sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    async fn insert(&self, draft: &EmployeeDraft) -> Result<Employee, StoreError> {
        let query = format!(
            "INSERT INTO employees (first_name, last_name, email, hire_date, salary, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let employee = sqlx::query_as::<_, Employee>(&query)
            .bind(&draft.first_name)
            .bind(&draft.last_name)
            .bind(&draft.email)
            .bind(draft.hire_date)
            .bind(draft.salary)
            .bind(clock::now())
            .fetch_one(&self.pool)
            .await?;
        Ok(employee)
    }

    async fn update(&self, employee: &Employee) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE employees \
             SET first_name = $1, last_name = $2, email = $3, \
                 hire_date = $4, salary = $5, updated_at = $6 \
             WHERE id = $7",
        )
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(employee.hire_date)
        .bind(employee.salary)
        .bind(employee.updated_at)
        .bind(employee.id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, employee: &Employee) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(employee.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
