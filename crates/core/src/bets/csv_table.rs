//! Tabular import/export codec for the bet ledger.
//!
//! The persisted file form is a CSV table with header
//! `date,sport,amount_invested,num_picks,win_or_lose,amount_paid,profit`.
//! Earlier files were written without the `sport` column; the two layouts are
//! modeled as explicit schema versions rather than ad hoc presence checks.

use csv::{ReaderBuilder, WriterBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::bets_model::{Bet, NewBet, Outcome};
use crate::constants::TABLE_DATE_FORMAT;
use crate::errors::{Error, Result, ValidationError};

/// Columns that must be present in every imported table.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "date",
    "amount_invested",
    "num_picks",
    "win_or_lose",
    "amount_paid",
];

const SPORT_COLUMN: &str = "sport";

/// Header written on export. Matches the newest persisted file form.
const EXPORT_HEADER: [&str; 7] = [
    "date",
    "sport",
    "amount_invested",
    "num_picks",
    "win_or_lose",
    "amount_paid",
    "profit",
];

/// Versioned table layout, detected from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableSchema {
    /// Original layout without a sport column; `sport` defaults to absent.
    V1,
    /// Layout with the optional sport column.
    V2,
}

/// Result of parsing a tabular file.
#[derive(Debug, Clone)]
pub struct ParsedTable {
    pub schema: TableSchema,
    pub bets: Vec<NewBet>,
}

/// Outcome summary of a completed import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub imported: usize,
    pub schema: TableSchema,
}

/// Parses CSV content into new-bet rows.
///
/// The whole table is validated before anything is returned: a missing
/// required column or a malformed value in any row fails the parse, so
/// callers can guarantee no partial import. A `profit` column is accepted but
/// ignored; profit is always recomputed from stake and payout.
pub fn parse_table(content: &[u8]) -> Result<ParsedTable> {
    let text = decode_content(content)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_ascii_lowercase())
        .collect();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h.as_str() == column) {
            return Err(ValidationError::MissingColumn(column.to_string()).into());
        }
    }

    let schema = if headers.iter().any(|h| h.as_str() == SPORT_COLUMN) {
        TableSchema::V2
    } else {
        TableSchema::V1
    };

    let column_index = |name: &str| headers.iter().position(|h| h.as_str() == name);

    let date_idx = column_index("date");
    let sport_idx = column_index(SPORT_COLUMN);
    let invested_idx = column_index("amount_invested");
    let picks_idx = column_index("num_picks");
    let outcome_idx = column_index("win_or_lose");
    let paid_idx = column_index("amount_paid");

    let (Some(date_idx), Some(invested_idx), Some(picks_idx), Some(outcome_idx), Some(paid_idx)) =
        (date_idx, invested_idx, picks_idx, outcome_idx, paid_idx)
    else {
        // Unreachable after the presence check above; kept as a guard.
        return Err(ValidationError::InvalidInput("Malformed header row".to_string()).into());
    };

    let mut bets = Vec::new();
    for (row_number, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            Error::from(ValidationError::InvalidInput(format!(
                "Row {}: {}",
                row_number + 1,
                e
            )))
        })?;

        let bet = NewBet {
            bet_date: chrono::NaiveDate::parse_from_str(
                field(&record, date_idx, row_number)?,
                TABLE_DATE_FORMAT,
            )?,
            sport: match sport_idx {
                Some(idx) => {
                    let value = field(&record, idx, row_number)?.trim();
                    (!value.is_empty()).then(|| value.to_string())
                }
                None => None,
            },
            amount_invested: Decimal::from_str(field(&record, invested_idx, row_number)?)?,
            num_picks: field(&record, picks_idx, row_number)?
                .parse::<i32>()
                .map_err(ValidationError::IntParse)?,
            outcome: Outcome::from_str(field(&record, outcome_idx, row_number)?)?,
            amount_paid: Decimal::from_str(field(&record, paid_idx, row_number)?)?,
        };
        bet.validate()?;
        bets.push(bet);
    }

    Ok(ParsedTable { schema, bets })
}

fn field<'a>(record: &'a csv::StringRecord, idx: usize, row_number: usize) -> Result<&'a str> {
    record.get(idx).ok_or_else(|| {
        ValidationError::InvalidInput(format!(
            "Row {} is missing column {}",
            row_number + 1,
            idx + 1
        ))
        .into()
    })
}

/// Serializes a bet collection to the canonical tabular form.
pub fn render_table(bets: &[Bet]) -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    writer.write_record(EXPORT_HEADER)?;
    for bet in bets {
        writer.write_record([
            bet.bet_date.format(TABLE_DATE_FORMAT).to_string(),
            bet.sport.clone().unwrap_or_default(),
            bet.amount_invested.to_string(),
            bet.num_picks.to_string(),
            bet.outcome.to_string(),
            bet.amount_paid.to_string(),
            bet.profit.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Unexpected(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Unexpected(e.to_string()))
}

/// Decodes content bytes to a UTF-8 string, handling a BOM if present.
fn decode_content(content: &[u8]) -> Result<String> {
    let content_without_bom =
        if content.len() >= 3 && content[0] == 0xEF && content[1] == 0xBB && content[2] == 0xBF {
            &content[3..]
        } else {
            content
        };

    std::str::from_utf8(content_without_bom)
        .map(str::to_string)
        .map_err(|e| {
            ValidationError::InvalidInput(format!("Table is not valid UTF-8: {}", e)).into()
        })
}
