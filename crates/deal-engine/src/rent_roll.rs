//! Rent-roll import from CSV exports. The intake UI normally types units
//! in directly; a spreadsheet export is the batch path.

use crate::domain::RentRollUnit;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum RentRollImportError {
    #[error("failed to read rent roll: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rent roll CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("unit '{label}' has a non-positive monthly rent of {monthly_rent}")]
    NonPositiveRent { label: String, monthly_rent: f64 },
}

/// Parses a rent-roll CSV (`Unit, Monthly Rent, Beds, Baths`) into units.
/// Rents must be positive; a zero-rent row is a data-entry error, not a
/// vacant-unit marker.
pub fn parse_rent_roll<R: Read>(reader: R) -> Result<Vec<RentRollUnit>, RentRollImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut units = Vec::new();
    for record in csv_reader.deserialize::<RentRollRow>() {
        let row = record?;
        if row.monthly_rent <= 0.0 {
            return Err(RentRollImportError::NonPositiveRent {
                label: row.unit,
                monthly_rent: row.monthly_rent,
            });
        }

        units.push(RentRollUnit {
            label: row.unit,
            monthly_rent: row.monthly_rent,
            bedrooms: row.beds,
            bathrooms: row.baths,
        });
    }

    Ok(units)
}

/// Convenience wrapper reading the CSV from disk.
pub fn import_rent_roll(path: &Path) -> Result<Vec<RentRollUnit>, RentRollImportError> {
    let file = File::open(path)?;
    parse_rent_roll(file)
}

#[derive(Debug, serde::Deserialize)]
struct RentRollRow {
    #[serde(rename = "Unit", default)]
    unit: String,
    #[serde(rename = "Monthly Rent")]
    monthly_rent: f64,
    #[serde(rename = "Beds", default)]
    beds: u8,
    #[serde(rename = "Baths", default)]
    baths: f64,
}
