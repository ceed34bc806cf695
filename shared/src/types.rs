use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An employee record as owned by the upstream employee service.
///
/// Field names on the wire carry the upstream's `employee_` prefix; the facade
/// serializes them back out unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct Employee {
    pub id: String,
    #[serde(rename = "employee_name")]
    pub name: String,
    #[serde(rename = "employee_salary")]
    pub salary: i64,
    #[serde(rename = "employee_age")]
    pub age: i32,
    #[serde(rename = "employee_title")]
    pub title: String,
    #[serde(rename = "employee_email")]
    pub email: String,
}

/// Creation payload. The upstream assigns `id` and `email`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct EmployeeInput {
    pub name: String,
    pub salary: i64,
    pub age: i32,
    pub title: String,
}

pub const MIN_EMPLOYEE_AGE: i32 = 16;
pub const MAX_EMPLOYEE_AGE: i32 = 75;

impl EmployeeInput {
    /// Checks the constraints the upstream enforces on creation, so bad input is
    /// rejected before a round trip.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be blank".into());
        }
        if self.title.trim().is_empty() {
            return Err("title must not be blank".into());
        }
        if self.salary <= 0 {
            return Err("salary must be greater than zero".into());
        }
        if !(MIN_EMPLOYEE_AGE..=MAX_EMPLOYEE_AGE).contains(&self.age) {
            return Err(format!(
                "age must be between {MIN_EMPLOYEE_AGE} and {MAX_EMPLOYEE_AGE}"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> EmployeeInput {
        EmployeeInput {
            name: "Bob".to_string(),
            salary: 8000,
            age: 30,
            title: "Lead".to_string(),
        }
    }

    #[test]
    fn employee_uses_prefixed_field_names() {
        let raw = r#"{
            "id": "5",
            "employee_name": "Bob",
            "employee_salary": 8000,
            "employee_age": 30,
            "employee_title": "Lead",
            "employee_email": "bob@mail.com"
        }"#;
        let employee: Employee = serde_json::from_str(raw).unwrap();

        assert_eq!(employee.name, "Bob");
        assert_eq!(employee.salary, 8000);

        let back = serde_json::to_value(&employee).unwrap();
        assert_eq!(back["employee_title"], "Lead");
        assert!(back.get("name").is_none());
    }

    #[test]
    fn validate_accepts_reasonable_input() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_name() {
        let bad = EmployeeInput {
            name: "   ".to_string(),
            ..input()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_positive_salary() {
        let bad = EmployeeInput {
            salary: 0,
            ..input()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_age() {
        for age in [15, 76] {
            let bad = EmployeeInput { age, ..input() };
            assert!(bad.validate().is_err(), "age {age} should be rejected");
        }
        for age in [16, 75] {
            let ok = EmployeeInput { age, ..input() };
            assert!(ok.validate().is_ok(), "age {age} should be accepted");
        }
    }
}
