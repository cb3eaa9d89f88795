use super::super::domain::BillingRecord;

const ID_FIELD: usize = 0;
const PRODUCT_LINE_FIELD: usize = 4;
const DATE_FIELD: usize = 6;
const CURRENCY_FIELD: usize = 7;
const AMOUNT_FIELD: usize = 8;

/// Fatal parse failures. These abort the whole invocation rather than produce
/// a per-record verdict.
#[derive(Debug, thiserror::Error)]
pub enum RecordParseError {
    #[error("record is missing required field {index}")]
    MissingField { index: usize },
    #[error("record {record_id}: amount '{value}' is not numeric")]
    Amount { record_id: String, value: String },
}

/// Split one line into a record. Fields are separated by bare commas; there is
/// no quoting or escaping, so a comma inside a field shifts every later field.
pub(crate) fn parse_record(line: &str) -> Result<BillingRecord, RecordParseError> {
    let fields: Vec<&str> = line.split(',').collect();

    let id = required(&fields, ID_FIELD)?.to_string();
    let product_line = required(&fields, PRODUCT_LINE_FIELD)?.to_string();
    let date = required(&fields, DATE_FIELD)?.to_string();
    let currency = required(&fields, CURRENCY_FIELD)?.to_string();
    let raw_amount = required(&fields, AMOUNT_FIELD)?;
    let amount = raw_amount
        .parse::<f64>()
        .map_err(|_| RecordParseError::Amount {
            record_id: id.clone(),
            value: raw_amount.to_string(),
        })?;

    Ok(BillingRecord {
        id,
        product_line,
        date,
        currency,
        amount,
    })
}

fn required<'a>(fields: &[&'a str], index: usize) -> Result<&'a str, RecordParseError> {
    fields
        .get(index)
        .copied()
        .ok_or(RecordParseError::MissingField { index })
}
