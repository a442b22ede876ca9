//! Maps parsed rows onto [`Holding`] records.

use log::{debug, warn};
use serde_json::json;

use super::csv_parser::parse_rows;
use super::ingestion_errors::IngestionError;
use super::ingestion_model::{ExtractionResult, SkipReason, SkippedRow};
use crate::constants::MIN_HEADER_COLUMNS;
use crate::holdings::Holding;

/// Semantic columns a holding source must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    HoldingId,
    Symbol,
    CompanyName,
    Sector,
    Environmental,
    Social,
    Governance,
    MarketValue,
}

impl Column {
    const ALL: [Column; 8] = [
        Column::HoldingId,
        Column::Symbol,
        Column::CompanyName,
        Column::Sector,
        Column::Environmental,
        Column::Social,
        Column::Governance,
        Column::MarketValue,
    ];

    /// Lowercase fragments that identify this column in a header cell.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Column::HoldingId => &["holdingid", "holding_id"],
            Column::Symbol => &["symbol"],
            Column::CompanyName => &["companyname", "company_name"],
            Column::Sector => &["sector"],
            Column::Environmental => &["environmentalscore", "environmental_score"],
            Column::Social => &["socialscore", "social_score"],
            Column::Governance => &["governancescore", "governance_score"],
            Column::MarketValue => &["marketvalue", "market_value"],
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Column::HoldingId => "holding_id",
            Column::Symbol => "symbol",
            Column::CompanyName => "company_name",
            Column::Sector => "sector",
            Column::Environmental => "environmental_score",
            Column::Social => "social_score",
            Column::Governance => "governance_score",
            Column::MarketValue => "market_value",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Column positions resolved from a header row.
#[derive(Debug, Clone, PartialEq)]
struct ColumnMapping {
    positions: [usize; 8],
}

impl ColumnMapping {
    /// Resolves every semantic column, or fails the structural check.
    fn from_header(header: &[String]) -> Result<Self, IngestionError> {
        let mut found: [Option<usize>; 8] = [None; 8];
        for (position, cell) in header.iter().enumerate() {
            let cell = cell.to_lowercase();
            for column in Column::ALL {
                if column.aliases().iter().any(|alias| cell.contains(alias)) {
                    // later matches overwrite earlier ones
                    found[column.index()] = Some(position);
                }
            }
        }

        let missing: Vec<&str> = Column::ALL
            .iter()
            .filter(|column| found[column.index()].is_none())
            .map(|column| column.name())
            .collect();

        if header.len() < MIN_HEADER_COLUMNS || !missing.is_empty() {
            return Err(IngestionError::InvalidFormat(format!(
                "header has {} columns (minimum {}), missing required headers: [{}]",
                header.len(),
                MIN_HEADER_COLUMNS,
                missing.join(", ")
            )));
        }

        let mut positions = [0usize; 8];
        for column in Column::ALL {
            positions[column.index()] = found[column.index()].unwrap_or_default();
        }
        Ok(Self { positions })
    }

    fn position(&self, column: Column) -> usize {
        self.positions[column.index()]
    }

    fn required_len(&self) -> usize {
        self.positions.iter().max().map_or(0, |max| max + 1)
    }
}

/// Extracts holdings from parsed rows whose first row is the header.
///
/// Rows that are too short or carry an unparseable number are skipped and
/// listed in the result; only a missing or malformed header fails the call.
pub fn extract_holdings(
    rows: &[Vec<String>],
    source_name: &str,
) -> Result<ExtractionResult, IngestionError> {
    let (header, data_rows) = rows.split_first().ok_or(IngestionError::EmptySource)?;
    let mapping = ColumnMapping::from_header(header)?;

    let mut result = ExtractionResult::default();
    for (offset, row) in data_rows.iter().enumerate() {
        // header is row 1
        let row_number = offset + 2;
        match parse_holding(row, &mapping) {
            Ok(holding) => {
                let mut holding = holding.with_data_source(source_name);
                holding
                    .metadata
                    .insert("sourceRow".to_string(), json!(row_number));
                result.holdings.push(holding);
            }
            Err(reason) => {
                warn!("Skipping row {} of {}: {}", row_number, source_name, reason);
                result.skipped_rows.push(SkippedRow { row_number, reason });
            }
        }
    }

    debug!(
        "Extracted {} holdings from {} ({} rows skipped)",
        result.holdings.len(),
        source_name,
        result.skipped_count()
    );
    Ok(result)
}

/// Parses CSV content and extracts holdings from it.
pub fn extract_from_csv(
    content: &[u8],
    source_name: &str,
) -> Result<ExtractionResult, IngestionError> {
    extract_holdings(&parse_rows(content), source_name)
}

fn parse_holding(row: &[String], mapping: &ColumnMapping) -> Result<Holding, SkipReason> {
    let required = mapping.required_len();
    if row.len() < required {
        return Err(SkipReason::TooFewColumns {
            expected: required,
            actual: row.len(),
        });
    }

    let text = |column: Column| row[mapping.position(column)].as_str();
    let number = |column: Column| -> Result<f64, SkipReason> {
        let value = text(column);
        value
            .parse::<f64>()
            .map_err(|_| SkipReason::InvalidNumber {
                field: column.name().to_string(),
                value: value.to_string(),
            })
    };

    let environmental = number(Column::Environmental)?;
    let social = number(Column::Social)?;
    let governance = number(Column::Governance)?;
    let market_value = number(Column::MarketValue)?;

    Ok(Holding::new(
        text(Column::HoldingId),
        text(Column::Symbol),
        text(Column::CompanyName),
        text(Column::Sector),
    )
    .with_scores(environmental, social, governance)
    .with_market_value(market_value))
}
