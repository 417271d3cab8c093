//! Row projection — a classified report to the sheet's column order.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::report::classify::ShiftReport;
use crate::report::vocabulary;

/// Wall-clock format for the "время отметки" column.
const TIME_FORMAT: &str = "%H:%M:%S";

/// Date format for the "дата отметки" column.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Build the ordered row for one report.
///
/// Field order mirrors [`vocabulary::HEADER`]: time, date, driver id,
/// organization, cash, then one 0/1 cell per trigger column. The timestamp is
/// passed in already zoned so this stays pure and testable with a pinned
/// clock.
pub fn build_row(
    report: &ShiftReport,
    driver_id: &str,
    organization: &str,
    now: DateTime<Tz>,
) -> Vec<String> {
    let mut row = Vec::with_capacity(vocabulary::HEADER.len());
    row.push(now.format(TIME_FORMAT).to_string());
    row.push(now.format(DATE_FORMAT).to_string());
    row.push(driver_id.to_string());
    row.push(organization.to_string());
    row.push(report.cash.to_string());
    row.extend(report.flags.iter().map(|flag| flag.to_string()));
    row
}
