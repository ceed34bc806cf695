//! Derived queries computed from a full employee listing. The upstream has no
//! search or ranking endpoints of its own.

use shared::types::Employee;

/// Case-insensitive substring match on the name. Input order is kept and an
/// empty fragment matches everyone.
pub fn search_by_name(employees: Vec<Employee>, fragment: &str) -> Vec<Employee> {
    let needle = fragment.to_lowercase();
    employees
        .into_iter()
        .filter(|e| e.name.to_lowercase().contains(&needle))
        .collect()
}

/// Highest salary, or `0` when there are no employees.
pub fn highest_salary(employees: &[Employee]) -> i64 {
    employees.iter().map(|e| e.salary).max().unwrap_or(0)
}

/// Names of the `n` best paid employees, highest first.
///
/// Ties keep their original relative order. Short input returns everyone.
pub fn top_n_earners(mut employees: Vec<Employee>, n: usize) -> Vec<String> {
    // sort_by is stable
    employees.sort_by(|a, b| b.salary.cmp(&a.salary));
    employees.into_iter().take(n).map(|e| e.name).collect()
}
