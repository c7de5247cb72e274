//! Derived numbers behind the dashboard cards and charts.
//!
//! Everything here is recomputed from the records on every call. Averages and
//! rates over nothing are `None`, never `NaN`.

pub mod engagement;
pub mod payroll;
pub mod training;
pub mod workforce;

use std::hash::Hash;

pub use engagement::{
    CategoryShare, NotificationSummary, PipelineColumn, RecruitmentSummary, kanban,
    notification_summary, recruitment_summary,
};
pub use payroll::{DepartmentPayroll, PayrollSummary, SalaryBucket, payroll_summary};
pub use training::{
    CategoryEnrollment, CourseCompletion, TopLearner, TrainingSummary, sessions_on,
    training_summary, upcoming_sessions,
};
pub use workforce::{
    AttendanceSummary, DailyAttendance, DepartmentAttendance, DepartmentBreakdown,
    DepartmentRating, MonthlyScore, PerformanceSummary, WorkforceOverview, attendance_summary,
    performance_summary, workforce_overview,
};

pub fn sum_by<T>(items: &[T], value: impl Fn(&T) -> f64) -> f64 {
    items.iter().map(value).sum()
}

pub fn average_by<T>(items: &[T], value: impl Fn(&T) -> f64) -> Option<f64> {
    if items.is_empty() {
        return None;
    }
    Some(sum_by(items, value) / items.len() as f64)
}

/// `part / whole` as a whole percentage, rounded half away from zero.
pub fn percent(part: f64, whole: f64) -> Option<u32> {
    if whole <= 0.0 {
        return None;
    }
    Some((part / whole * 100.0).round() as u32)
}

/// Partition by key, keeping groups in the order their first member appears.
pub fn group_by<T, K>(items: &[T], key: impl Fn(&T) -> K) -> Vec<(K, Vec<&T>)>
where
    K: Eq + Hash + Clone,
{
    let mut groups: Vec<(K, Vec<&T>)> = Vec::new();
    let mut slots = std::collections::HashMap::new();
    for item in items {
        let k = key(item);
        match slots.get(&k) {
            Some(&slot) => {
                let group: &mut (K, Vec<&T>) = &mut groups[slot];
                group.1.push(item);
            }
            None => {
                slots.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }
    groups
}

/// One decimal place, as ratings are shown.
pub fn format_score(value: f64) -> String {
    format!("{value:.1}")
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_over_nothing_are_none() {
        let empty: [f64; 0] = [];
        assert_eq!(average_by(&empty, |v| *v), None);
        assert_eq!(percent(3.0, 0.0), None);
    }

    #[test]
    fn ratings_average_to_one_decimal() {
        let ratings = [4.8, 4.5, 4.2];
        let avg = average_by(&ratings, |v| *v).unwrap();
        assert_eq!(format_score(avg), "4.5");
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let words = ["beta", "alpha", "bravo", "apple", "charlie"];
        let groups = group_by(&words, |w| w.chars().next().unwrap_or_default());
        let keys: Vec<char> = groups.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!['b', 'a', 'c']);
        assert_eq!(groups[0].1, vec![&"beta", &"bravo"]);
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent(1.0, 8.0), Some(13));
        assert_eq!(percent(22.0, 28.0), Some(79));
    }
}
