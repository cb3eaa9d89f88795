use chrono::NaiveDate;

use super::super::domain::{BillingRecord, RuleViolation};
use super::config::ValidationRuleSet;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) struct RuleBreach {
    pub rule: RuleViolation,
    pub detail: String,
}

/// Check one record against the rule set. Checks run in a fixed order and the
/// first broken rule wins; the amount field is never rule-checked.
pub(crate) fn check_record(
    record: &BillingRecord,
    rules: &ValidationRuleSet,
) -> Option<RuleBreach> {
    if !rules.allowed_product_lines.contains(&record.product_line) {
        return Some(RuleBreach {
            rule: RuleViolation::UnrecognisedProductLine,
            detail: format!("unrecognised product line: {}", record.product_line),
        });
    }

    if !rules.allowed_currencies.contains(&record.currency) {
        return Some(RuleBreach {
            rule: RuleViolation::UnrecognisedCurrency,
            detail: format!("unrecognised currency: {}", record.currency),
        });
    }

    if !is_strict_date(&record.date) {
        return Some(RuleBreach {
            rule: RuleViolation::BadDateFormat,
            detail: format!("incorrect date format: {}", record.date),
        });
    }

    None
}

/// Accept only zero-padded `YYYY-MM-DD` naming a real calendar date. The shape
/// check runs first because `chrono` tolerates un-padded months and days.
fn is_strict_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
}
