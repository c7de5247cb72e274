//! Shared builders and proptest strategies for the cross-crate suites.

use chrono::NaiveDate;
use entity::{Employee, EmployeeStatus};
use products_hr::{Collections, HrModule, Processor, fixtures};
use proptest::prelude::*;

pub const DEPARTMENTS: [&str; 7] = [
    "Engineering",
    "Marketing",
    "Finance",
    "Sales",
    "HR",
    "Operations",
    "Product",
];

/// The demo data set with jobs that finish immediately.
pub fn demo() -> HrModule {
    HrModule::seeded(fixtures::DEFAULT_SEED, Processor::instant())
}

pub fn demo_collections() -> Collections {
    fixtures::seed(fixtures::DEFAULT_SEED)
}

pub fn employee(id: usize, name: &str, department: &str, rating: f64) -> Employee {
    Employee {
        id: format!("emp-{id}"),
        name: name.to_string(),
        email: format!("{}@company.com", name.to_lowercase().replace(' ', ".")),
        department: department.to_string(),
        role: "Analyst".to_string(),
        salary: 60_000,
        performance_rating: rating,
        attendance_rate: 90,
        join_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap_or_default(),
        status: EmployeeStatus::Active,
    }
}

pub fn department() -> impl Strategy<Value = String> {
    prop::sample::select(DEPARTMENTS.to_vec()).prop_map(str::to_string)
}

/// Short fragments that hit some demo names and miss others.
pub fn search_term() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec!["an", "son", "ER", "kim", "lee", "developer", "zzz"])
            .prop_map(str::to_string),
        "[a-z]{1,3}",
    ]
}

pub fn person_name() -> impl Strategy<Value = String> {
    ("[A-Z][a-z]{2,8}", "[A-Z][a-z]{2,10}").prop_map(|(first, last)| format!("{first} {last}"))
}

/// Up to `max` employees with generated names, departments and ratings.
pub fn staff(max: usize) -> impl Strategy<Value = Vec<Employee>> {
    prop::collection::vec((person_name(), department(), 0.0f64..=5.0), 0..=max).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (name, dept, rating))| employee(i, &name, &dept, rating))
                .collect()
        },
    )
}
