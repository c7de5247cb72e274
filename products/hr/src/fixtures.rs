//! Demo data the dashboard starts with.
//!
//! Most records are fixed. Payroll overtime and status, and a few course
//! attributes, are drawn from a seeded `StdRng` so a given seed always
//! produces the same data set.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use entity::{
    AttendanceDay, Candidate, CandidateStage, Course, CourseStatus, Delivery, Difficulty,
    Employee, EmployeeStatus, EmploymentType, Enrollment, EnrollmentStatus, Interview,
    InterviewKind, InterviewStatus, Notification, NotificationKind, NotificationPreferences,
    NotificationTemplate, PayrollRecord, PayrollStatus, PerformanceSample, Position,
    PositionStatus, Preferences, Priority, Profile, RelatedType, SessionStatus, Settings,
    TrainingSession,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::store::{Collections, Table};

pub const DEFAULT_SEED: u64 = 2024;

pub const TAX_RATE: f64 = 0.22;
pub const BENEFITS_RATE: f64 = 0.08;

/// The full demo data set.
pub fn seed(seed: u64) -> Collections {
    let mut rng = StdRng::seed_from_u64(seed);
    let employees = employees();
    let payroll = payroll(&employees, &mut rng);
    let courses = courses(&mut rng);
    Collections {
        attendance: attendance(),
        performance: performance(),
        payroll: Table::new(payroll),
        positions: Table::new(positions()),
        candidates: Table::new(candidates()),
        interviews: Table::new(interviews()),
        courses: Table::new(courses),
        sessions: Table::new(sessions()),
        enrollments: Table::new(enrollments()),
        notifications: Table::new(notifications()),
        templates: Table::new(templates()),
        settings: settings(),
        employees: Table::new(employees),
    }
}

pub fn employees() -> Vec<Employee> {
    [
        ("1", "Sarah Johnson", "Engineering", "Senior Developer", 85_000, 4.8, 96, (2022, 3, 15)),
        ("2", "Michael Chen", "Marketing", "Marketing Manager", 72_000, 4.5, 92, (2021, 8, 22)),
        ("3", "Emily Rodriguez", "Finance", "Financial Analyst", 68_000, 4.2, 98, (2023, 1, 10)),
        ("4", "David Wilson", "Sales", "Sales Representative", 58_000, 3.9, 88, (2022, 11, 5)),
        ("5", "Lisa Thompson", "HR", "HR Specialist", 62_000, 4.6, 95, (2021, 5, 18)),
        ("6", "James Anderson", "Operations", "Operations Manager", 78_000, 4.3, 94, (2022, 7, 12)),
        ("7", "Maria Garcia", "Product", "Product Designer", 71_000, 4.7, 97, (2023, 2, 28)),
        ("8", "Robert Kim", "Engineering", "Backend Developer", 82_000, 4.4, 91, (2021, 11, 15)),
        ("9", "Jennifer Lee", "Marketing", "Content Specialist", 55_000, 4.1, 93, (2023, 4, 3)),
        ("10", "Alex Turner", "Sales", "Sales Manager", 75_000, 4.0, 89, (2022, 1, 20)),
    ]
    .into_iter()
    .map(
        |(id, name, department, role, salary, rating, attendance, (y, m, d))| Employee {
            id: id.into(),
            email: format!("{}@company.com", name.to_lowercase().replace(' ', ".")),
            name: name.into(),
            department: department.into(),
            role: role.into(),
            salary,
            performance_rating: rating,
            attendance_rate: attendance,
            join_date: naive_date(y, m, d),
            status: EmployeeStatus::Active,
        },
    )
    .collect()
}

pub fn attendance() -> Vec<AttendanceDay> {
    [
        (1, 142, 8, 12),
        (2, 145, 5, 10),
        (3, 148, 7, 8),
        (4, 144, 6, 14),
        (5, 147, 4, 9),
        (6, 149, 3, 7),
        (7, 146, 5, 11),
    ]
    .into_iter()
    .map(|(day, present, absent, late)| AttendanceDay {
        date: naive_date(2024, 1, day),
        present,
        absent,
        late,
    })
    .collect()
}

pub fn performance() -> Vec<PerformanceSample> {
    const MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
    let engineering: [u32; 6] = [88, 92, 87, 94, 91, 89];
    let marketing: [u32; 6] = [82, 86, 84, 88, 85, 87];
    [("Engineering", engineering), ("Marketing", marketing)]
        .into_iter()
        .flat_map(|(department, scores)| {
            MONTHS
                .into_iter()
                .zip(scores)
                .map(move |(month, score)| PerformanceSample {
                    month: month.into(),
                    department: department.into(),
                    score,
                })
        })
        .collect()
}

/// One January 2024 record per employee. Bonus scales with rating; taxes and
/// benefits deductions are flat shares of gross pay.
pub fn payroll(employees: &[Employee], rng: &mut StdRng) -> Vec<PayrollRecord> {
    employees
        .iter()
        .map(|employee| {
            let overtime = rng.gen_range(0..2_000);
            let bonus =
                (employee.salary as f64 * 0.1 * (employee.performance_rating / 5.0)).floor() as i64;
            let gross = (employee.salary + overtime + bonus) as f64;
            let status = if rng.gen_bool(0.7) {
                PayrollStatus::Processed
            } else if rng.gen_bool(0.5) {
                PayrollStatus::Paid
            } else {
                PayrollStatus::Pending
            };
            let pay_date = rng.gen_bool(0.7).then(|| naive_date(2024, 1, 31));
            PayrollRecord {
                id: format!("payroll-{}", employee.id),
                employee_id: employee.id.clone(),
                month: "January".into(),
                year: 2024,
                base_salary: employee.salary,
                overtime,
                bonus,
                deductions: (gross * BENEFITS_RATE).floor() as i64,
                taxes: (gross * TAX_RATE).floor() as i64,
                status,
                pay_date,
            }
        })
        .collect()
}

pub fn positions() -> Vec<Position> {
    vec![
        Position {
            id: "1".into(),
            title: "Senior Frontend Developer".into(),
            department: "Engineering".into(),
            location: "San Francisco, CA".into(),
            employment_type: EmploymentType::FullTime,
            salary_range: "$120,000 - $150,000".into(),
            description: "We are looking for a Senior Frontend Developer to join our engineering team."
                .into(),
            requirements: strings(&[
                "5+ years React experience",
                "TypeScript proficiency",
                "Team leadership skills",
            ]),
            status: PositionStatus::Open,
            applicants: 24,
            posted: naive_date(2024, 1, 15),
            deadline: Some(naive_date(2024, 2, 15)),
            priority: Priority::High,
        },
        Position {
            id: "2".into(),
            title: "Product Manager".into(),
            department: "Product".into(),
            location: "New York, NY".into(),
            employment_type: EmploymentType::FullTime,
            salary_range: "$130,000 - $160,000".into(),
            description: "Seeking an experienced Product Manager to drive product strategy.".into(),
            requirements: strings(&[
                "3+ years PM experience",
                "Agile methodology",
                "Data-driven mindset",
            ]),
            status: PositionStatus::Open,
            applicants: 18,
            posted: naive_date(2024, 1, 20),
            deadline: Some(naive_date(2024, 2, 20)),
            priority: Priority::High,
        },
        Position {
            id: "3".into(),
            title: "Marketing Specialist".into(),
            department: "Marketing".into(),
            location: "Remote".into(),
            employment_type: EmploymentType::FullTime,
            salary_range: "$60,000 - $80,000".into(),
            description: "Join our marketing team to create compelling campaigns.".into(),
            requirements: strings(&[
                "2+ years marketing experience",
                "Social media expertise",
                "Content creation",
            ]),
            status: PositionStatus::Open,
            applicants: 32,
            posted: naive_date(2024, 1, 10),
            deadline: Some(naive_date(2024, 2, 10)),
            priority: Priority::Medium,
        },
    ]
}

pub fn candidates() -> Vec<Candidate> {
    [
        ("1", "John Smith", "+1 (555) 123-4567", "Senior Frontend Developer", CandidateStage::Interview, 85, 16, "Strong technical background, good communication skills"),
        ("2", "Sarah Johnson", "+1 (555) 234-5678", "Product Manager", CandidateStage::Screening, 78, 21, "Great product sense, needs technical depth"),
        ("3", "Mike Chen", "+1 (555) 345-6789", "Marketing Specialist", CandidateStage::Applied, 72, 11, "Creative portfolio, limited experience"),
        ("4", "Emily Davis", "+1 (555) 456-7890", "Senior Frontend Developer", CandidateStage::Rejected, 45, 17, "Insufficient experience for senior role"),
        ("5", "David Wilson", "+1 (555) 567-8901", "Product Manager", CandidateStage::Hired, 92, 22, "Excellent candidate, strong hire"),
    ]
    .into_iter()
    .map(|(id, name, phone, position, stage, score, day, notes)| {
        let handle = name.to_lowercase().replace(' ', ".");
        Candidate {
            id: id.into(),
            email: format!("{handle}@email.com"),
            resume: format!("{}-resume.pdf", handle.replace('.', "-")),
            name: name.into(),
            phone: phone.into(),
            position: position.into(),
            stage,
            score,
            applied_date: naive_date(2024, 1, day),
            notes: notes.into(),
        }
    })
    .collect()
}

pub fn interviews() -> Vec<Interview> {
    vec![
        Interview {
            id: "1".into(),
            candidate_id: "1".into(),
            candidate_name: "John Smith".into(),
            position: "Senior Frontend Developer".into(),
            date: naive_date(2024, 1, 25),
            time: naive_time(14, 0),
            kind: InterviewKind::Video,
            interviewer: "Sarah Johnson".into(),
            location: None,
            meeting_link: Some("https://zoom.us/j/123456789".into()),
            status: InterviewStatus::Scheduled,
            notes: Some("Technical interview - React and TypeScript focus".into()),
        },
        Interview {
            id: "2".into(),
            candidate_id: "2".into(),
            candidate_name: "Sarah Johnson".into(),
            position: "Product Manager".into(),
            date: naive_date(2024, 1, 26),
            time: naive_time(10, 0),
            kind: InterviewKind::Phone,
            interviewer: "Mike Chen".into(),
            location: None,
            meeting_link: None,
            status: InterviewStatus::Scheduled,
            notes: Some("Initial screening call".into()),
        },
    ]
}

/// The four catalog courses. Capacity, price and rating come from `rng`; the
/// rest cycles through fixed attribute lists by position.
pub fn courses(rng: &mut StdRng) -> Vec<Course> {
    let base = [
        ("Leadership Development", 28, 22, "8 weeks", "Management"),
        ("Technical Skills Bootcamp", 45, 38, "12 weeks", "Technical"),
        ("Communication Excellence", 35, 31, "6 weeks", "Soft Skills"),
        ("Cybersecurity Awareness", 120, 95, "2 weeks", "Security"),
    ];
    let instructors = ["Dr. Sarah Wilson", "Prof. Michael Chen", "Lisa Rodriguez", "David Thompson"];
    let statuses = [CourseStatus::Active, CourseStatus::Upcoming, CourseStatus::Completed];
    let locations = ["Conference Room A", "Online", "Training Center", "Hybrid"];
    let deliveries = [Delivery::Online, Delivery::InPerson, Delivery::Hybrid];
    let difficulties = [Difficulty::Beginner, Difficulty::Intermediate, Difficulty::Advanced];

    base.into_iter()
        .enumerate()
        .map(|(index, (name, enrolled, completed, duration, category))| {
            let rating: f64 = 4.0 + rng.r#gen::<f64>();
            Course {
                id: (index + 1).to_string(),
                course_name: name.into(),
                enrolled,
                completed,
                duration: duration.into(),
                category: category.into(),
                instructor: instructors[index % 4].into(),
                start_date: Some(naive_date(2024, 2, 1)),
                end_date: Some(naive_date(2024, 4, 1)),
                description: "Comprehensive training program designed to enhance professional skills and knowledge."
                    .into(),
                status: statuses[index % 3],
                max_capacity: enrolled + rng.gen_range(0..20) + 10,
                location: locations[index % 4].into(),
                delivery: deliveries[index % 3],
                difficulty: difficulties[index % 3],
                price: rng.gen_range(100..600),
                rating: (rating * 10.0).round() / 10.0,
                materials: strings(&[
                    "Course Handbook",
                    "Video Lectures",
                    "Practice Exercises",
                    "Assessment Tools",
                ]),
                prerequisites: if index > 0 {
                    strings(&["Basic knowledge required"])
                } else {
                    Vec::new()
                },
            }
        })
        .collect()
}

pub fn sessions() -> Vec<TrainingSession> {
    vec![
        TrainingSession {
            id: "1".into(),
            course_id: "1".into(),
            session_name: "Leadership Fundamentals".into(),
            date: naive_date(2024, 1, 20),
            time: naive_time(9, 0),
            duration: "2 hours".into(),
            instructor: "Dr. Sarah Wilson".into(),
            attendees: 15,
            max_attendees: 25,
            status: SessionStatus::Scheduled,
            meeting_link: Some("https://zoom.us/j/123456789".into()),
            location: Some("Conference Room A".into()),
        },
        TrainingSession {
            id: "2".into(),
            course_id: "2".into(),
            session_name: "React Advanced Concepts".into(),
            date: naive_date(2024, 1, 22),
            time: naive_time(14, 0),
            duration: "3 hours".into(),
            instructor: "Prof. Michael Chen".into(),
            attendees: 20,
            max_attendees: 30,
            status: SessionStatus::Scheduled,
            meeting_link: Some("https://meet.google.com/abc-defg-hij".into()),
            location: None,
        },
        TrainingSession {
            id: "3".into(),
            course_id: "3".into(),
            session_name: "Effective Communication Workshop".into(),
            date: naive_date(2024, 1, 18),
            time: naive_time(10, 30),
            duration: "4 hours".into(),
            instructor: "Lisa Rodriguez".into(),
            attendees: 18,
            max_attendees: 20,
            status: SessionStatus::Completed,
            meeting_link: None,
            location: Some("Training Center".into()),
        },
    ]
}

pub fn enrollments() -> Vec<Enrollment> {
    vec![
        Enrollment {
            id: "1".into(),
            employee_id: "1".into(),
            course_id: "1".into(),
            enrollment_date: naive_date(2024, 1, 10),
            progress: 75,
            status: EnrollmentStatus::InProgress,
            completion_date: None,
            certificate_issued: false,
            score: Some(85),
        },
        Enrollment {
            id: "2".into(),
            employee_id: "2".into(),
            course_id: "2".into(),
            enrollment_date: naive_date(2024, 1, 5),
            progress: 100,
            status: EnrollmentStatus::Completed,
            completion_date: Some(naive_date(2024, 1, 15)),
            certificate_issued: true,
            score: Some(92),
        },
    ]
}

pub fn notifications() -> Vec<Notification> {
    let base = Notification {
        id: String::new(),
        kind: NotificationKind::Info,
        title: String::new(),
        message: String::new(),
        timestamp: timestamp(2024, 1, 10, 9, 0),
        read: false,
        priority: Priority::Medium,
        category: String::new(),
        recipients: Vec::new(),
        action_required: false,
        related_id: None,
        related_type: None,
    };
    vec![
        Notification {
            id: "1".into(),
            kind: NotificationKind::Warning,
            title: "Performance Review Due".into(),
            message: "Performance reviews are due for 5 employees".into(),
            priority: Priority::High,
            category: "Performance".into(),
            recipients: strings(&["1", "2"]),
            action_required: true,
            ..base.clone()
        },
        Notification {
            id: "2".into(),
            title: "New Training Available".into(),
            message: "New training program available: Advanced Excel".into(),
            timestamp: timestamp(2024, 1, 10, 8, 30),
            category: "Training".into(),
            ..base.clone()
        },
        Notification {
            id: "3".into(),
            kind: NotificationKind::Success,
            title: "Payroll Processed".into(),
            message: "Payroll processed successfully for January".into(),
            timestamp: timestamp(2024, 1, 9, 16, 45),
            read: true,
            priority: Priority::Low,
            category: "Payroll".into(),
            action_required: true,
            ..base.clone()
        },
        Notification {
            id: "4".into(),
            kind: NotificationKind::Alert,
            title: "Attendance Alert".into(),
            message: "High absence rate detected in Sales department".into(),
            timestamp: timestamp(2024, 1, 9, 14, 20),
            priority: Priority::High,
            category: "Attendance".into(),
            ..base.clone()
        },
        Notification {
            id: "5".into(),
            title: "System Maintenance".into(),
            message: "Scheduled maintenance will occur tonight from 2:00 AM to 4:00 AM".into(),
            timestamp: timestamp(2024, 1, 10, 20, 0),
            category: "System".into(),
            ..base.clone()
        },
        Notification {
            id: "6".into(),
            kind: NotificationKind::Success,
            title: "New Employee Onboarded".into(),
            message: "John Smith has successfully completed the onboarding process".into(),
            timestamp: timestamp(2024, 1, 10, 15, 30),
            read: true,
            priority: Priority::Low,
            category: "HR".into(),
            related_id: Some("1".into()),
            related_type: Some(RelatedType::Employee),
            ..base
        },
    ]
}

pub fn templates() -> Vec<NotificationTemplate> {
    vec![
        NotificationTemplate {
            id: "1".into(),
            name: "Performance Review Reminder".into(),
            category: "Performance".into(),
            subject: "Performance Review Due".into(),
            message: "Your performance review is due. Please complete it by {deadline}.".into(),
            kind: NotificationKind::Warning,
            priority: Priority::High,
            triggers: strings(&["review_due", "review_overdue"]),
        },
        NotificationTemplate {
            id: "2".into(),
            name: "Training Completion".into(),
            category: "Training".into(),
            subject: "Training Course Completed".into(),
            message: "Congratulations! You have successfully completed {course_name}.".into(),
            kind: NotificationKind::Success,
            priority: Priority::Medium,
            triggers: strings(&["course_completed"]),
        },
        NotificationTemplate {
            id: "3".into(),
            name: "Attendance Warning".into(),
            category: "Attendance".into(),
            subject: "Attendance Alert".into(),
            message: "Your attendance rate has fallen below the required threshold.".into(),
            kind: NotificationKind::Alert,
            priority: Priority::High,
            triggers: strings(&["low_attendance"]),
        },
    ]
}

pub fn settings() -> Settings {
    Settings {
        profile: Profile {
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john.doe@company.com".into(),
            phone: "+1 (555) 123-4567".into(),
            position: "HR Manager".into(),
            department: "Human Resources".into(),
            location: "New York, NY".into(),
            join_date: naive_date(2022, 1, 15),
            bio: "Experienced HR professional with over 10 years in talent management and organizational development."
                .into(),
        },
        notifications: NotificationPreferences {
            email: true,
            push: true,
            sms: false,
            performance: true,
            attendance: true,
            payroll: false,
            recruitment: true,
            training: true,
        },
        preferences: Preferences {
            theme: "light".into(),
            language: "en".into(),
            timezone: "UTC-5".into(),
            date_format: "MM/DD/YYYY".into(),
            time_format: "12".into(),
            density: "comfortable".into(),
            auto_save: true,
            keyboard_shortcuts: true,
        },
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

fn naive_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

fn naive_time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid seed time")
}

fn timestamp(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid seed timestamp")
}
