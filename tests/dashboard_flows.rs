use anyhow::Result;
use chrono::NaiveDate;
use entity::{CandidateStage, SessionStatus};
use products_hr::{
    ExportDataset, HrError, ReportFilters, ReportKind,
    forms::{CourseForm, EmployeeForm, EnrollmentForm, InterviewForm, SessionForm},
    query::{CandidateFilter, CourseFilter, EmployeeFilter, PayrollFilter},
};
use suite_tests::demo;

#[tokio::test]
async fn an_interview_moves_the_candidate_along() -> Result<()> {
    let hr = demo();
    let form = InterviewForm {
        candidate_id: "2".into(),
        date: "2024-02-05".into(),
        time: "14:00".into(),
        interviewer: "Lisa Thompson".into(),
        ..Default::default()
    };
    let interview = hr.schedule_interview(&form).await?;
    assert_eq!(interview.candidate_name, "Sarah Johnson");
    assert_eq!(interview.position, "Product Manager");

    let pipeline = hr.pipeline().await;
    let interviewing = pipeline
        .iter()
        .find(|column| column.stage == CandidateStage::Interview)
        .map(|column| column.candidates.len());
    assert_eq!(interviewing, Some(2));

    let screening = hr
        .candidates(&CandidateFilter {
            stage: Some(CandidateStage::Screening),
            ..Default::default()
        })
        .await;
    assert!(screening.is_empty());
    Ok(())
}

#[tokio::test]
async fn a_new_course_fills_up_through_enrollments() -> Result<()> {
    let hr = demo();
    let course = hr
        .add_course(&CourseForm {
            course_name: "Data Literacy".into(),
            category: "Technical".into(),
            instructor: "Dr. Sarah Wilson".into(),
            ..Default::default()
        })
        .await?;
    assert_eq!(course.enrolled, 0);
    assert_eq!(course.max_capacity, 30);

    for employee_id in ["1", "8"] {
        hr.enroll(&EnrollmentForm {
            employee_id: employee_id.into(),
            course_id: course.id.clone(),
        })
        .await?;
    }
    let technical = hr
        .courses(&CourseFilter {
            category: Some("Technical".into()),
            ..Default::default()
        })
        .await;
    let stored = technical.iter().find(|c| c.id == course.id).unwrap();
    assert_eq!(stored.enrolled, 2);
    assert_eq!(hr.training_summary().await.total_enrolled, 230);

    let session = hr
        .add_session(&SessionForm {
            course_id: course.id.clone(),
            session_name: "Kickoff".into(),
            date: "2024-03-01".into(),
            ..Default::default()
        })
        .await?;
    let started = hr
        .set_session_status(&session.id, SessionStatus::InProgress)
        .await?;
    assert_eq!(started.status, SessionStatus::InProgress);
    assert_eq!(started.max_attendees, 20);
    Ok(())
}

#[tokio::test]
async fn sessions_need_a_known_course() {
    let hr = demo();
    let err = hr
        .add_session(&SessionForm {
            course_id: "missing".into(),
            session_name: "Orphan".into(),
            date: "2024-03-01".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn employee_edits_flow_into_payroll_and_reports() -> Result<()> {
    let hr = demo();
    let mut form = EmployeeForm {
        name: "Sarah Johnson-Park".into(),
        email: "sarah.johnson@company.com".into(),
        department: "Engineering".into(),
        role: "Staff Developer".into(),
        ..Default::default()
    };
    let updated = hr.update_employee("1", &form).await?;
    assert_eq!(updated.salary, 85_000);

    let rows = hr
        .payroll(&PayrollFilter {
            search: Some("johnson-park".into()),
            ..Default::default()
        })
        .await;
    assert_eq!(rows.len(), 1);

    let filters = ReportFilters {
        search: Some("Johnson-Park".into()),
        ..Default::default()
    };
    let day = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    let report = hr.report(ReportKind::Payroll, &filters, day).await?;
    assert_eq!(report.filename, "payroll-report-2024-02-01.csv");
    assert!(report.body.contains("\"Sarah Johnson-Park\""));

    form.name = String::new();
    let err = hr.update_employee("1", &form).await.unwrap_err();
    assert!(matches!(err, HrError::MissingFields { .. }));
    Ok(())
}

#[tokio::test]
async fn exports_cover_every_dataset() -> Result<()> {
    let hr = demo();
    for dataset in [
        ExportDataset::Employees,
        ExportDataset::Performance,
        ExportDataset::Attendance,
        ExportDataset::Payroll,
    ] {
        let (report, message) = hr.export_data(dataset).await?;
        assert!(report.filename.ends_with(".csv"));
        assert!(message.ends_with("data exported successfully!"));
        assert!(report.body.lines().count() > 1);
    }
    Ok(())
}

#[tokio::test]
async fn deleting_an_employee_updates_every_view() -> Result<()> {
    let hr = demo();
    let removed = hr.delete_employee("10").await?;
    assert_eq!(removed.name, "Alex Turner");
    let sales = hr
        .employees(&EmployeeFilter {
            department: Some("Sales".into()),
            ..Default::default()
        })
        .await;
    assert_eq!(sales.len(), 1);
    assert_eq!(hr.overview().await.total_employees, 9);
    assert!(hr.delete_employee("10").await.unwrap_err().is_not_found());
    Ok(())
}
