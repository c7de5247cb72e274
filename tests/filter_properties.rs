use chrono::NaiveDate;
use products_hr::{
    ReportFilters, ReportKind,
    forms::{EmployeeForm, PayrollEditForm},
    metrics::{self, average_by, format_score},
    query::{self, EmployeeFilter, PayrollFilter},
    reports::build_report,
};
use proptest::prelude::*;
use suite_tests::{demo_collections, department, employee, person_name, search_term, staff};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
}

fn by_department(department: &str) -> EmployeeFilter {
    EmployeeFilter {
        department: Some(department.to_string()),
        ..Default::default()
    }
}

fn by_search(term: &str) -> EmployeeFilter {
    EmployeeFilter {
        search: Some(term.to_string()),
        ..Default::default()
    }
}

fn ids(rows: &[entity::Employee]) -> Vec<String> {
    rows.iter().map(|e| e.id.clone()).collect()
}

proptest! {
    #[test]
    fn department_and_search_commute(
        extra in staff(12),
        dept in department(),
        term in search_term(),
    ) {
        let mut employees = demo_collections().employees.all().to_vec();
        employees.extend(extra);

        let dept_first = query::filter_employees(
            &query::filter_employees(&employees, &by_department(&dept)),
            &by_search(&term),
        );
        let search_first = query::filter_employees(
            &query::filter_employees(&employees, &by_search(&term)),
            &by_department(&dept),
        );
        let combined = query::filter_employees(
            &employees,
            &EmployeeFilter {
                search: Some(term.clone()),
                department: Some(dept.clone()),
                ..Default::default()
            },
        );
        prop_assert_eq!(ids(&dept_first), ids(&search_first));
        prop_assert_eq!(ids(&dept_first), ids(&combined));
    }

    #[test]
    fn average_performance_is_the_mean(employees in staff(20)) {
        let overview = metrics::workforce_overview(&employees);
        if employees.is_empty() {
            prop_assert_eq!(overview.average_performance, None);
        } else {
            let sum: f64 = employees.iter().map(|e| e.performance_rating).sum();
            let expected = sum / employees.len() as f64;
            let actual = overview.average_performance.unwrap();
            prop_assert!((actual - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn added_employee_shows_under_its_department(
        name in person_name(),
        dept in prop_oneof![department(), "[A-Z][a-z]{3,12}"],
    ) {
        let mut data = demo_collections();
        let form = EmployeeForm {
            name: name.clone(),
            email: "new.hire@company.com".into(),
            department: dept.clone(),
            role: "Analyst".into(),
            ..Default::default()
        };
        let added = form.create("new-hire".into(), today()).unwrap();
        data.employees.upsert(added);

        let found = query::filter_employees(data.employees.all(), &by_department(&dept));
        prop_assert!(found.iter().any(|e| e.id == "new-hire" && e.name == name));
    }

    #[test]
    fn delete_removes_exactly_one_id(index in 0usize..10) {
        let mut data = demo_collections();
        let before = ids(data.employees.all());
        let target = before[index].clone();
        let removed = data.remove_employee(&target).unwrap();
        prop_assert_eq!(&removed.id, &target);

        let after = ids(data.employees.all());
        let expected: Vec<String> = before.into_iter().filter(|id| *id != target).collect();
        prop_assert_eq!(after, expected);

        let view = query::filter_employees(data.employees.all(), &by_department(&removed.department));
        prop_assert!(view.iter().all(|e| e.id != target));
        let payroll = query::payroll_rows(data.payroll.all(), data.employees.all(), &PayrollFilter::default());
        prop_assert_eq!(payroll.len(), 9);
    }

    #[test]
    fn payroll_csv_has_one_line_per_row(dept in department(), term in prop::option::of(search_term())) {
        let data = demo_collections();
        let filter = PayrollFilter {
            search: term.clone(),
            department: Some(dept.clone()),
            ..Default::default()
        };
        let rows = query::payroll_rows(data.payroll.all(), data.employees.all(), &filter);
        let filters = ReportFilters {
            search: term,
            department: Some(dept),
            ..Default::default()
        };
        match build_report(ReportKind::Payroll, &data, &filters, today()) {
            Ok(report) => prop_assert_eq!(report.body.lines().count(), rows.len() + 1),
            Err(err) => {
                prop_assert!(rows.is_empty());
                prop_assert_eq!(err.to_string(), "No data available to generate report");
            }
        }
    }

    #[test]
    fn names_with_commas_stay_quoted(first in "[A-Z][a-z]{2,8}", last in "[A-Z][a-z]{2,8}") {
        let mut data = demo_collections();
        let mut renamed = data.employees.get("1").unwrap().clone();
        renamed.name = format!("{last}, {first}");
        data.replace_employee(renamed).unwrap();
        let filters = ReportFilters {
            department: Some("Engineering".into()),
            ..Default::default()
        };
        let report = build_report(ReportKind::Payroll, &data, &filters, today()).unwrap();
        let quoted = format!("\"{last}, {first}\",\"Engineering\",");
        prop_assert!(report.body.lines().any(|line| line.starts_with(&quoted)));
    }

    #[test]
    fn payroll_edits_keep_net_pay_consistent(
        base in prop::option::of(0i64..200_000),
        overtime in prop::option::of(0i64..5_000),
        bonus in prop::option::of(0i64..20_000),
        taxes in prop::option::of(0i64..60_000),
        deductions in prop::option::of(0i64..20_000),
    ) {
        let data = demo_collections();
        let current = data.payroll.get("payroll-3").unwrap().clone();
        let text = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_default();
        let form = PayrollEditForm {
            base_salary: text(base),
            overtime: text(overtime),
            bonus: text(bonus),
            taxes: text(taxes),
            deductions: text(deductions),
            ..Default::default()
        };
        let edited = form.apply(&current).unwrap();
        let typed = |v: Option<i64>, current: i64| v.filter(|n| *n != 0).unwrap_or(current);
        prop_assert_eq!(edited.base_salary, typed(base, current.base_salary));
        prop_assert_eq!(edited.taxes, typed(taxes, current.taxes));
        prop_assert_eq!(edited.bonus, typed(bonus, current.bonus));
        prop_assert_eq!(
            edited.net_pay(),
            edited.base_salary + edited.overtime + edited.bonus - edited.taxes - edited.deductions
        );
        prop_assert_eq!(edited.gross_pay() - edited.net_pay(), edited.taxes + edited.deductions);
    }
}

#[test]
fn sample_ratings_average_to_four_and_a_half() {
    let employees = vec![
        employee(1, "Ann Lee", "Engineering", 4.8),
        employee(2, "Bo Chan", "Engineering", 4.5),
        employee(3, "Cy Diaz", "Engineering", 4.2),
    ];
    let average = average_by(&employees, |e| e.performance_rating).unwrap();
    assert_eq!(format_score(average), "4.5");
    let overview = metrics::workforce_overview(&employees);
    assert_eq!(overview.departments[0].count, 3);
}
