use async_graphql::SimpleObject;
use chrono::{NaiveDate, NaiveDateTime};
use entity::{
    Course, CourseStatus, Employee, Enrollment, EnrollmentStatus, SessionStatus, TrainingSession,
};
use serde::Serialize;

use super::{average_by, percent};

/// Categories the catalog always reports on, in display order. Categories
/// found only on courses are appended after these.
pub const COURSE_CATEGORIES: [&str; 8] = [
    "Management",
    "Technical",
    "Soft Skills",
    "Security",
    "Sales",
    "Marketing",
    "Finance",
    "Operations",
];
pub const UPCOMING_LIMIT: usize = 5;
pub const TOP_LEARNER_LIMIT: usize = 3;

#[derive(Clone, Debug, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSummary {
    pub total_courses: usize,
    pub active_courses: usize,
    pub total_enrolled: u32,
    pub total_completed: u32,
    /// Zero when nobody is enrolled.
    pub completion_rate: u32,
    pub average_rating: Option<f64>,
    pub certificates_issued: usize,
    pub courses: Vec<CourseCompletion>,
    pub categories: Vec<CategoryEnrollment>,
    pub top_learners: Vec<TopLearner>,
}

#[derive(Clone, Debug, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct CourseCompletion {
    pub course_id: String,
    pub course_name: String,
    pub enrolled: u32,
    pub completed: u32,
    pub completion_rate: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, SimpleObject)]
pub struct CategoryEnrollment {
    pub category: String,
    pub courses: usize,
    pub enrolled: u32,
}

/// A completed, scored enrollment joined to its employee and course.
#[derive(Clone, Debug, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct TopLearner {
    /// 1 for the best score.
    pub rank: usize,
    pub enrollment_id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub course_name: String,
    pub score: u32,
}

pub fn training_summary(
    courses: &[Course],
    enrollments: &[Enrollment],
    employees: &[Employee],
) -> TrainingSummary {
    let total_enrolled: u32 = courses.iter().map(|c| c.enrolled).sum();
    let total_completed: u32 = courses.iter().map(|c| c.completed).sum();
    TrainingSummary {
        total_courses: courses.len(),
        active_courses: courses
            .iter()
            .filter(|c| c.status == CourseStatus::Active)
            .count(),
        total_enrolled,
        total_completed,
        completion_rate: completion_rate(total_completed, total_enrolled),
        average_rating: average_by(courses, |c| c.rating),
        certificates_issued: enrollments.iter().filter(|e| e.certificate_issued).count(),
        courses: courses
            .iter()
            .map(|c| CourseCompletion {
                course_id: c.id.clone(),
                course_name: c.course_name.clone(),
                enrolled: c.enrolled,
                completed: c.completed,
                completion_rate: completion_rate(c.completed, c.enrolled),
            })
            .collect(),
        categories: category_enrollment(courses),
        top_learners: top_learners(enrollments, employees, courses),
    }
}

/// Best scores among completed enrollments, highest first. Ties keep store
/// order; a zero score counts as unscored, and enrollments whose employee or
/// course is gone are skipped.
pub fn top_learners(
    enrollments: &[Enrollment],
    employees: &[Employee],
    courses: &[Course],
) -> Vec<TopLearner> {
    let mut scored: Vec<(&Enrollment, u32)> = enrollments
        .iter()
        .filter(|e| e.status == EnrollmentStatus::Completed)
        .filter_map(|e| e.score.filter(|s| *s > 0).map(|s| (e, s)))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
        .into_iter()
        .filter_map(|(enrollment, score)| {
            let employee = employees.iter().find(|e| e.id == enrollment.employee_id)?;
            let course = courses.iter().find(|c| c.id == enrollment.course_id)?;
            Some((enrollment, employee, course, score))
        })
        .take(TOP_LEARNER_LIMIT)
        .enumerate()
        .map(|(index, (enrollment, employee, course, score))| TopLearner {
            rank: index + 1,
            enrollment_id: enrollment.id.clone(),
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            course_name: course.course_name.clone(),
            score,
        })
        .collect()
}

pub fn completion_rate(completed: u32, enrolled: u32) -> u32 {
    percent(f64::from(completed), f64::from(enrolled)).unwrap_or(0)
}

pub fn category_enrollment(courses: &[Course]) -> Vec<CategoryEnrollment> {
    let mut categories: Vec<String> = COURSE_CATEGORIES.iter().map(|c| c.to_string()).collect();
    for course in courses {
        if !categories.contains(&course.category) {
            categories.push(course.category.clone());
        }
    }
    categories
        .into_iter()
        .map(|category| {
            let members = courses.iter().filter(|c| c.category == category);
            CategoryEnrollment {
                courses: members.clone().count(),
                enrolled: members.map(|c| c.enrolled).sum(),
                category,
            }
        })
        .collect()
}

/// Scheduled sessions starting after `now`, soonest first.
pub fn upcoming_sessions(sessions: &[TrainingSession], now: NaiveDateTime) -> Vec<TrainingSession> {
    let mut upcoming: Vec<TrainingSession> = sessions
        .iter()
        .filter(|s| s.status == SessionStatus::Scheduled && s.starts_at() > now)
        .cloned()
        .collect();
    upcoming.sort_by_key(TrainingSession::starts_at);
    upcoming.truncate(UPCOMING_LIMIT);
    upcoming
}

pub fn sessions_on(sessions: &[TrainingSession], day: NaiveDate) -> Vec<TrainingSession> {
    sessions
        .iter()
        .filter(|s| s.status == SessionStatus::Scheduled && s.date == day)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use chrono::NaiveTime;

    #[test]
    fn catalog_totals() {
        let data = fixtures::seed(fixtures::DEFAULT_SEED);
        let summary = training_summary(
            data.courses.all(),
            data.enrollments.all(),
            data.employees.all(),
        );
        assert_eq!(summary.total_enrolled, 228);
        assert_eq!(summary.total_completed, 186);
        assert_eq!(summary.completion_rate, 82);
        assert_eq!(summary.certificates_issued, 1);
        assert_eq!(summary.active_courses, 2);
        assert_eq!(summary.courses[0].completion_rate, 79);
        assert_eq!(summary.categories.len(), 8);
        assert_eq!(
            summary.categories[3],
            CategoryEnrollment {
                category: "Security".into(),
                courses: 1,
                enrolled: 120,
            }
        );
    }

    #[test]
    fn empty_catalog_completes_nothing() {
        let summary = training_summary(&[], &[], &[]);
        assert_eq!(summary.completion_rate, 0);
        assert_eq!(summary.average_rating, None);
        assert!(summary.top_learners.is_empty());
    }

    #[test]
    fn top_learners_rank_completed_scores() {
        let data = fixtures::seed(fixtures::DEFAULT_SEED);
        let mut enrollments = data.enrollments.all().to_vec();
        let template = enrollments[1].clone();
        let finished = |id: &str, employee: &str, course: &str, score: Option<u32>| Enrollment {
            id: id.into(),
            employee_id: employee.into(),
            course_id: course.into(),
            status: EnrollmentStatus::Completed,
            progress: 100,
            score,
            ..template.clone()
        };
        enrollments.extend([
            finished("a", "3", "1", Some(97)),
            finished("b", "4", "3", Some(92)),
            finished("c", "5", "4", Some(99)),
            finished("d", "6", "1", None),
            finished("e", "missing", "1", Some(100)),
        ]);
        let top = top_learners(&enrollments, data.employees.all(), data.courses.all());
        let ids: Vec<&str> = top.iter().map(|t| t.enrollment_id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "2"]);
        assert_eq!(top[2].rank, 3);
        assert_eq!(top[2].employee_name, "Michael Chen");
        assert_eq!(top[2].score, 92);
    }

    #[test]
    fn upcoming_skips_past_and_unscheduled() {
        let sessions = fixtures::sessions();
        let now = NaiveDate::from_ymd_opt(2024, 1, 19)
            .unwrap()
            .and_time(NaiveTime::MIN);
        let ids: Vec<String> = upcoming_sessions(&sessions, now)
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["1", "2"]);

        let later = NaiveDate::from_ymd_opt(2024, 1, 21)
            .unwrap()
            .and_time(NaiveTime::MIN);
        assert_eq!(upcoming_sessions(&sessions, later).len(), 1);

        let day = NaiveDate::from_ymd_opt(2024, 1, 18).unwrap();
        assert!(sessions_on(&sessions, day).is_empty());
    }
}
