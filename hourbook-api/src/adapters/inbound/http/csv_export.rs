//! Spreadsheet-style CSV rendering of an [`HoursMatrix`].

use csv::WriterBuilder;
use rollup::{format_date, round_amount, round_hours, HoursMatrix, MatrixRow};
use rust_decimal::Decimal;

use crate::domain::{models::MatrixReport, ReportingError};

/// Renders the matrix as CSV: a title line, one row per (project, user), a
/// total row per project, the grand total and a per-user summary. Earnings
/// columns are only written when the report includes them.
pub fn render_matrix_csv(report: &MatrixReport, currency: &str) -> Result<Vec<u8>, ReportingError> {
    let matrix = &report.matrix;
    let earnings_header = format!("Earnings ({currency})");
    let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());

    let mut write = |record: Vec<String>| {
        writer
            .write_record(&record)
            .map_err(|err| ReportingError::storage(format!("failed to write CSV row: {err}")))
    };

    write(vec![report.title.clone()])?;

    let mut header = vec!["Company".to_string(), "Project".to_string(), "User".to_string()];
    header.extend(matrix.dates.iter().copied().map(format_date));
    header.push("Total".to_string());
    if report.include_earnings {
        header.push("Rate".to_string());
        header.push(earnings_header.clone());
    }
    write(header)?;

    for project in &matrix.projects {
        for row in &project.rows {
            let mut record = vec![
                project.company_name.clone(),
                project.project_name.clone(),
                row.user_name.clone(),
            ];
            record.extend(row.cells.iter().copied().map(cell));
            record.push(hours(row.total));
            if report.include_earnings {
                record.extend(rate_and_earnings(row));
            }
            write(record)?;
        }

        let mut total = vec![
            project.company_name.clone(),
            project.project_name.clone(),
            "Project total".to_string(),
        ];
        total.extend(project.totals.iter().copied().map(cell));
        total.push(hours(project.total));
        if report.include_earnings {
            total.push(String::new());
            total.push(amount(project.earnings));
        }
        write(total)?;
    }

    let mut grand_total = vec!["Total".to_string(), String::new(), String::new()];
    grand_total.extend(matrix.totals.iter().copied().map(cell));
    grand_total.push(hours(matrix.total));
    if report.include_earnings {
        grand_total.push(String::new());
        grand_total.push(amount(matrix.earnings));
    }
    write(grand_total)?;

    write_user_summary(matrix, report.include_earnings, &earnings_header, &mut write)?;

    writer
        .into_inner()
        .map_err(|err| ReportingError::storage(format!("failed to finish CSV output: {err}")))
}

fn write_user_summary(
    matrix: &HoursMatrix,
    include_earnings: bool,
    earnings_header: &str,
    write: &mut impl FnMut(Vec<String>) -> Result<(), ReportingError>,
) -> Result<(), ReportingError> {
    if matrix.users.is_empty() {
        return Ok(());
    }

    let mut header = vec!["User".to_string(), "Hours".to_string()];
    if include_earnings {
        header.push("Rate".to_string());
        header.push(earnings_header.to_string());
    }
    write(header)?;

    for user in &matrix.users {
        let mut record = vec![user.user_name.clone(), hours(user.hours)];
        if include_earnings {
            record.push(user.rate.normalize().to_string());
            record.push(amount(user.earnings));
        }
        write(record)?;
    }

    Ok(())
}

fn rate_and_earnings(row: &MatrixRow) -> [String; 2] {
    [row.rate.normalize().to_string(), amount(row.earnings)]
}

/// Empty cells stay blank so the sheet reads like a timesheet.
fn cell(value: Decimal) -> String {
    if value.is_zero() {
        String::new()
    } else {
        hours(value)
    }
}

fn hours(value: Decimal) -> String {
    round_hours(value).normalize().to_string()
}

fn amount(value: Decimal) -> String {
    round_amount(value).normalize().to_string()
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, str::FromStr};

    use rollup::{CompanyId, EntryId, Hours, ProjectId, ReportEntry, UserId};
    use time::{macros::date, Date};

    use super::*;

    fn entry(id: i32, user: (i32, &str), date: Date, hours: &str) -> ReportEntry {
        ReportEntry {
            id: EntryId::new(id),
            user_id: UserId::new(user.0),
            user_name: user.1.to_string(),
            project_id: ProjectId::new(1),
            project_name: "Web".to_string(),
            company_id: CompanyId::new(1),
            company_name: "Acme".to_string(),
            date,
            hours: Hours::from_str(hours).unwrap(),
            description: None,
        }
    }

    fn report(include_earnings: bool) -> MatrixReport {
        let entries = vec![
            entry(1, (2, "Uma One"), date!(2024 - 03 - 05), "3.5"),
            entry(2, (2, "Uma One"), date!(2024 - 03 - 06), "2"),
            entry(3, (3, "Ulf Two"), date!(2024 - 03 - 06), "1.5"),
        ];
        let rates = HashMap::from([(UserId::new(2), Decimal::from(10))]);

        MatrixReport {
            title: "Hours report".to_string(),
            matrix: HoursMatrix::build(&entries, &rates),
            include_earnings,
        }
    }

    fn lines(report: &MatrixReport) -> Vec<String> {
        let bytes = render_matrix_csv(report, "EUR").unwrap();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn renders_rows_totals_and_earnings() {
        let lines = lines(&report(true));

        assert_eq!(lines[0], "Hours report");
        assert_eq!(
            lines[1],
            "Company,Project,User,05.03.2024,06.03.2024,Total,Rate,Earnings (EUR)"
        );
        assert_eq!(lines[2], "Acme,Web,Ulf Two,,1.5,1.5,0,0");
        assert_eq!(lines[3], "Acme,Web,Uma One,3.5,2,5.5,10,55");
        assert_eq!(lines[4], "Acme,Web,Project total,3.5,3.5,7,,55");
        assert_eq!(lines[5], "Total,,,3.5,3.5,7,,55");
        assert_eq!(lines[6], "User,Hours,Rate,Earnings (EUR)");
        assert_eq!(lines[7], "Ulf Two,1.5,0,0");
        assert_eq!(lines[8], "Uma One,5.5,10,55");
    }

    #[test]
    fn earnings_columns_are_omitted_when_not_included() {
        let lines = lines(&report(false));

        assert_eq!(lines[1], "Company,Project,User,05.03.2024,06.03.2024,Total");
        assert_eq!(lines[3], "Acme,Web,Uma One,3.5,2,5.5");
        assert_eq!(lines[6], "User,Hours");
        assert!(lines.iter().all(|line| !line.contains("55")));
    }

    #[test]
    fn empty_matrix_still_has_a_header() {
        let report = MatrixReport {
            title: "Nothing".to_string(),
            matrix: HoursMatrix::build(&[], &HashMap::<UserId, Decimal>::new()),
            include_earnings: true,
        };

        let lines = lines(&report);
        assert_eq!(lines[1], "Company,Project,User,Total,Rate,Earnings (EUR)");
        assert_eq!(lines.last().map(String::as_str), Some("Total,,,0,,0"));
    }
}
