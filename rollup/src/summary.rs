//! Flat summaries and chart series computed from the same entry list the
//! rollup consumes.

use std::collections::BTreeMap;

use itertools::Itertools;
use rust_decimal::Decimal;
use time::Date;

use crate::{CompanyId, DateRange, ProjectId, ReportEntry, UserId};

fn sum_hours<'a>(entries: impl IntoIterator<Item = &'a ReportEntry>) -> Decimal {
    entries.into_iter().map(|entry| entry.hours.value()).sum()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub user_id: UserId,
    pub user_name: String,
    pub hours: Decimal,
    pub entries: usize,
    pub projects: usize,
    pub companies: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub project_id: ProjectId,
    pub project_name: String,
    pub company_id: CompanyId,
    pub company_name: String,
    pub hours: Decimal,
    pub entries: usize,
    pub users: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanySummary {
    pub company_id: CompanyId,
    pub company_name: String,
    pub hours: Decimal,
    pub entries: usize,
    pub projects: usize,
    pub users: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTotal {
    pub date: Date,
    pub hours: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTotal {
    pub user_id: UserId,
    pub user_name: String,
    pub hours: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTotal {
    pub project_id: ProjectId,
    pub project_name: String,
    pub company_name: String,
    pub hours: Decimal,
}

pub fn user_summaries(entries: &[ReportEntry]) -> Vec<UserSummary> {
    entries
        .iter()
        .into_group_map_by(|entry| entry.user_id)
        .into_values()
        .map(|group| UserSummary {
            user_id: group[0].user_id,
            user_name: group[0].user_name.clone(),
            hours: sum_hours(group.iter().copied()),
            entries: group.len(),
            projects: group.iter().map(|entry| entry.project_id).unique().count(),
            companies: group.iter().map(|entry| entry.company_id).unique().count(),
        })
        .sorted_by(|a, b| (&a.user_name, a.user_id).cmp(&(&b.user_name, b.user_id)))
        .collect()
}

pub fn project_summaries(entries: &[ReportEntry]) -> Vec<ProjectSummary> {
    entries
        .iter()
        .into_group_map_by(|entry| entry.project_id)
        .into_values()
        .map(|group| ProjectSummary {
            project_id: group[0].project_id,
            project_name: group[0].project_name.clone(),
            company_id: group[0].company_id,
            company_name: group[0].company_name.clone(),
            hours: sum_hours(group.iter().copied()),
            entries: group.len(),
            users: group.iter().map(|entry| entry.user_id).unique().count(),
        })
        .sorted_by(|a, b| {
            (&a.company_name, &a.project_name, a.project_id).cmp(&(
                &b.company_name,
                &b.project_name,
                b.project_id,
            ))
        })
        .collect()
}

pub fn company_summaries(entries: &[ReportEntry]) -> Vec<CompanySummary> {
    entries
        .iter()
        .into_group_map_by(|entry| entry.company_id)
        .into_values()
        .map(|group| CompanySummary {
            company_id: group[0].company_id,
            company_name: group[0].company_name.clone(),
            hours: sum_hours(group.iter().copied()),
            entries: group.len(),
            projects: group.iter().map(|entry| entry.project_id).unique().count(),
            users: group.iter().map(|entry| entry.user_id).unique().count(),
        })
        .sorted_by(|a, b| (&a.company_name, a.company_id).cmp(&(&b.company_name, b.company_id)))
        .collect()
}

/// Hours per calendar day, oldest first. Days without entries are absent.
pub fn daily_totals(entries: &[ReportEntry]) -> Vec<DailyTotal> {
    let mut days: BTreeMap<Date, Decimal> = BTreeMap::new();
    for entry in entries {
        *days.entry(entry.date).or_default() += entry.hours.value();
    }

    days.into_iter()
        .map(|(date, hours)| DailyTotal { date, hours })
        .collect()
}

/// Hours per user, most hours first.
pub fn user_totals(entries: &[ReportEntry]) -> Vec<UserTotal> {
    entries
        .iter()
        .into_group_map_by(|entry| entry.user_id)
        .into_values()
        .map(|group| UserTotal {
            user_id: group[0].user_id,
            user_name: group[0].user_name.clone(),
            hours: sum_hours(group.iter().copied()),
        })
        .sorted_by(|a, b| {
            b.hours
                .cmp(&a.hours)
                .then_with(|| a.user_name.cmp(&b.user_name))
                .then_with(|| a.user_id.cmp(&b.user_id))
        })
        .collect()
}

/// Hours per project, most hours first.
pub fn project_totals(entries: &[ReportEntry]) -> Vec<ProjectTotal> {
    entries
        .iter()
        .into_group_map_by(|entry| entry.project_id)
        .into_values()
        .map(|group| ProjectTotal {
            project_id: group[0].project_id,
            project_name: group[0].project_name.clone(),
            company_name: group[0].company_name.clone(),
            hours: sum_hours(group.iter().copied()),
        })
        .sorted_by(|a, b| {
            b.hours
                .cmp(&a.hours)
                .then_with(|| a.project_name.cmp(&b.project_name))
                .then_with(|| a.project_id.cmp(&b.project_id))
        })
        .collect()
}

/// Headline numbers for a reporting period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub total_hours: Decimal,
    pub entries: usize,
    pub active_projects: usize,
    pub active_users: usize,
    /// Total hours spread over every day of the range, worked or not. Zero
    /// unless both range bounds are set.
    pub average_per_day: Decimal,
}

impl Stats {
    pub fn compute(entries: &[ReportEntry], range: DateRange) -> Self {
        let total_hours = sum_hours(entries);
        let average_per_day = match range.days() {
            Some(days) if days > 0 => total_hours / Decimal::from(days),
            _ => Decimal::ZERO,
        };

        Self {
            total_hours,
            entries: entries.len(),
            active_projects: entries.iter().map(|entry| entry.project_id).unique().count(),
            active_users: entries.iter().map(|entry| entry.user_id).unique().count(),
            average_per_day,
        }
    }
}

/// Everything logged on a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReport {
    pub date: Date,
    pub total_hours: Decimal,
    pub entries: usize,
    pub users: usize,
    pub projects: usize,
    pub by_project: Vec<ProjectTotal>,
    pub by_user: Vec<UserTotal>,
}

impl DailyReport {
    /// Entries on other days are ignored.
    pub fn compute(entries: &[ReportEntry], date: Date) -> Self {
        let day = entries
            .iter()
            .filter(|entry| entry.date == date)
            .cloned()
            .collect::<Vec<_>>();
        let stats = Stats::compute(&day, DateRange::single(date));

        Self {
            date,
            total_hours: stats.total_hours,
            entries: stats.entries,
            users: stats.active_users,
            projects: stats.active_projects,
            by_project: project_totals(&day),
            by_user: user_totals(&day),
        }
    }
}
