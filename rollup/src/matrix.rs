use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;
use rust_decimal::Decimal;
use time::Date;

use crate::{CompanyId, Earnings, ProjectId, RateLookup, ReportEntry, UserEarnings, UserId};

/// One user's hours on one project, one cell per matrix date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    pub user_id: UserId,
    pub user_name: String,
    /// Zero where nothing was logged.
    pub cells: Vec<Decimal>,
    pub total: Decimal,
    pub rate: Decimal,
    pub earnings: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixProject {
    pub project_id: ProjectId,
    pub project_name: String,
    pub company_id: CompanyId,
    pub company_name: String,
    pub rows: Vec<MatrixRow>,
    /// Column sums over `rows`.
    pub totals: Vec<Decimal>,
    pub total: Decimal,
    pub earnings: Decimal,
}

/// Project × user × date grid with totals and earnings, laid out the way the
/// spreadsheet export prints it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoursMatrix {
    pub dates: Vec<Date>,
    pub projects: Vec<MatrixProject>,
    pub totals: Vec<Decimal>,
    pub total: Decimal,
    pub earnings: Decimal,
    pub users: Vec<UserEarnings>,
}

type ProjectKey = (String, String, ProjectId, CompanyId);
type UserKey = (String, UserId);

impl HoursMatrix {
    pub fn build(entries: &[ReportEntry], rates: &impl RateLookup) -> Self {
        let earnings = Earnings::calculate(entries, rates);
        let dates = entries
            .iter()
            .map(|entry| entry.date)
            .unique()
            .sorted()
            .collect::<Vec<_>>();
        let width = dates.len();
        let columns = dates
            .iter()
            .enumerate()
            .map(|(column, date)| (*date, column))
            .collect::<HashMap<_, _>>();

        let mut grid: BTreeMap<ProjectKey, BTreeMap<UserKey, Vec<Decimal>>> = BTreeMap::new();
        for entry in entries {
            let Some(&column) = columns.get(&entry.date) else {
                continue;
            };

            let cells = grid
                .entry((
                    entry.company_name.clone(),
                    entry.project_name.clone(),
                    entry.project_id,
                    entry.company_id,
                ))
                .or_default()
                .entry((entry.user_name.clone(), entry.user_id))
                .or_insert_with(|| vec![Decimal::ZERO; width]);
            cells[column] += entry.hours.value();
        }

        let projects = grid
            .into_iter()
            .map(|((company_name, project_name, project_id, company_id), users)| {
                let rows = users
                    .into_iter()
                    .map(|((user_name, user_id), cells)| {
                        let pair = earnings.pair(user_id, project_id);
                        MatrixRow {
                            user_id,
                            user_name,
                            total: cells.iter().sum(),
                            cells,
                            rate: pair.map_or(Decimal::ZERO, |pair| pair.rate),
                            earnings: pair.map_or(Decimal::ZERO, |pair| pair.earnings),
                        }
                    })
                    .collect::<Vec<_>>();

                MatrixProject {
                    project_id,
                    project_name,
                    company_id,
                    company_name,
                    totals: column_totals(rows.iter().map(|row| &row.cells), width),
                    total: rows.iter().map(|row| row.total).sum(),
                    earnings: earnings.project_total(project_id),
                    rows,
                }
            })
            .collect::<Vec<_>>();

        Self {
            totals: column_totals(projects.iter().map(|project| &project.totals), width),
            total: projects.iter().map(|project| project.total).sum(),
            earnings: earnings.total(),
            users: earnings.users().into_iter().cloned().collect(),
            dates,
            projects,
        }
    }
}

fn column_totals<'a>(rows: impl Iterator<Item = &'a Vec<Decimal>>, width: usize) -> Vec<Decimal> {
    rows.fold(vec![Decimal::ZERO; width], |mut totals, row| {
        for (total, cell) in totals.iter_mut().zip(row) {
            *total += *cell;
        }
        totals
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{dec, entry};
    use time::macros::date;

    fn sample() -> Vec<ReportEntry> {
        vec![
            entry(1, (1, "Acme"), (1, "Web"), (2, "Bea"), date!(2024 - 03 - 02), "2"),
            entry(2, (1, "Acme"), (1, "Web"), (1, "Ann"), date!(2024 - 03 - 01), "3.5"),
            entry(3, (1, "Acme"), (1, "Web"), (1, "Ann"), date!(2024 - 03 - 01), "1"),
            entry(4, (1, "Acme"), (2, "App"), (1, "Ann"), date!(2024 - 03 - 03), "1.25"),
        ]
    }

    fn rates() -> HashMap<UserId, Decimal> {
        HashMap::from([(UserId::new(1), dec("100")), (UserId::new(2), dec("50.5"))])
    }

    #[test]
    fn columns_are_the_distinct_dates_in_order() {
        let matrix = HoursMatrix::build(&sample(), &rates());
        assert_eq!(
            matrix.dates,
            vec![
                date!(2024 - 03 - 01),
                date!(2024 - 03 - 02),
                date!(2024 - 03 - 03)
            ]
        );
    }

    #[test]
    fn rows_hold_per_date_hours_and_earnings() {
        let matrix = HoursMatrix::build(&sample(), &rates());
        let app = &matrix.projects[0];
        let web = &matrix.projects[1];

        assert_eq!(app.project_name, "App");
        assert_eq!(web.project_name, "Web");

        let ann = &web.rows[0];
        assert_eq!(ann.user_name, "Ann");
        assert_eq!(ann.cells, vec![dec("4.5"), Decimal::ZERO, Decimal::ZERO]);
        assert_eq!(ann.total, dec("4.5"));
        assert_eq!(ann.earnings, dec("450"));

        let bea = &web.rows[1];
        assert_eq!(bea.cells, vec![Decimal::ZERO, dec("2"), Decimal::ZERO]);
        assert_eq!(bea.earnings, dec("101"));
    }

    #[test]
    fn project_and_grand_totals_are_column_sums() {
        let matrix = HoursMatrix::build(&sample(), &rates());
        let web = &matrix.projects[1];

        assert_eq!(web.totals, vec![dec("4.5"), dec("2"), Decimal::ZERO]);
        assert_eq!(web.total, dec("6.5"));
        assert_eq!(web.earnings, dec("551"));

        assert_eq!(matrix.totals, vec![dec("4.5"), dec("2"), dec("1.25")]);
        assert_eq!(matrix.total, dec("7.75"));
        assert_eq!(matrix.earnings, dec("676"));
    }

    #[test]
    fn user_summary_lists_everyone_by_name() {
        let matrix = HoursMatrix::build(&sample(), &rates());
        let users = matrix
            .users
            .iter()
            .map(|user| (user.user_name.as_str(), user.hours, user.earnings))
            .collect::<Vec<_>>();

        assert_eq!(
            users,
            vec![("Ann", dec("5.75"), dec("575")), ("Bea", dec("2"), dec("101"))]
        );
    }

    #[test]
    fn empty_input_is_an_empty_matrix() {
        let matrix = HoursMatrix::build(&[], &rates());
        assert!(matrix.projects.is_empty());
        assert!(matrix.dates.is_empty());
        assert_eq!(matrix.total, Decimal::ZERO);
    }
}
