//! CSV-based life table loader
//!
//! Loads the three per-gender mortality tables from CSV files in data/tables/.
//! Expected columns: `exact_age,number_alive`.

use super::{MortalityRow, MortalityTable, MortalityTableStore};
use std::error::Error;
use std::fs::File;
use std::path::Path;

/// Default path to the table directory
pub const DEFAULT_TABLES_PATH: &str = "data/tables";

/// File names of the per-gender tables
pub const MALE_TABLE_FILE: &str = "mort_male.csv";
pub const FEMALE_TABLE_FILE: &str = "mort_female.csv";
pub const OTHER_TABLE_FILE: &str = "mort_other.csv";

/// Raw CSV row matching the table file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    exact_age: u32,
    number_alive: f64,
}

/// Load a single life table from a CSV file
pub fn load_table(path: &Path) -> Result<MortalityTable, Box<dyn Error>> {
    let file = File::open(path)?;
    load_table_from_reader(file)
}

/// Load a single life table from any reader (e.g. string buffer)
pub fn load_table_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<MortalityTable, Box<dyn Error>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        rows.push(MortalityRow {
            exact_age: row.exact_age,
            number_alive: row.number_alive,
        });
    }

    Ok(MortalityTable::new(rows)?)
}

/// Load all three per-gender tables from a directory
pub fn load_store(dir: &Path) -> Result<MortalityTableStore, Box<dyn Error>> {
    let male = load_table(&dir.join(MALE_TABLE_FILE))?;
    let female = load_table(&dir.join(FEMALE_TABLE_FILE))?;
    let other = load_table(&dir.join(OTHER_TABLE_FILE))?;

    Ok(MortalityTableStore::new(male, female, other))
}

/// Load the table store from the default location
pub fn load_default_store() -> Result<MortalityTableStore, Box<dyn Error>> {
    load_store(Path::new(DEFAULT_TABLES_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_buffer() {
        let csv = "exact_age,number_alive\n0,100000\n1,99420\n2,99371\n";
        let table = load_table_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.rows().len(), 3);
        assert_eq!(table.survivors_at(0), Some(100000.0));
        assert_eq!(table.survivors_at(2), Some(99371.0));
    }

    #[test]
    fn test_load_rejects_bad_survivorship() {
        let csv = "exact_age,number_alive\n0,100\n1,120\n";
        assert!(load_table_from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_load_rejects_malformed_row() {
        let csv = "exact_age,number_alive\n0,not_a_number\n";
        assert!(load_table_from_reader(csv.as_bytes()).is_err());
    }
}
