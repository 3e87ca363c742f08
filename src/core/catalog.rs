use crate::core::{CardRecord, Catalog};
use crate::utils::error::{AdvisorError, Result};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

pub const NAME_COLUMN: &str = "card_name";
pub const PERKS_COLUMN: &str = "perks_summary";

/// Loads the catalog from a CSV file. Either the whole catalog loads or an error is returned.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    tracing::debug!("Loading card catalog from {}", path.display());

    let file = File::open(path).map_err(|e| AdvisorError::DataError {
        message: match e.kind() {
            ErrorKind::NotFound => format!("{} not found", path.display()),
            _ => format!("cannot read {}: {}", path.display(), e),
        },
    })?;

    let catalog = read_catalog(file)?;
    tracing::info!("Loaded {} cards from {}", catalog.len(), path.display());
    Ok(catalog)
}

pub fn read_catalog<R: Read>(reader: R) -> Result<Catalog> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for required in [NAME_COLUMN, PERKS_COLUMN] {
        if !headers.iter().any(|h| h == required) {
            return Err(AdvisorError::DataError {
                message: format!(
                    "CSV must contain '{}' and '{}' columns (missing '{}')",
                    NAME_COLUMN, PERKS_COLUMN, required
                ),
            });
        }
    }

    let mut cards = Vec::new();
    for (index, row) in csv_reader.deserialize::<CardRecord>().enumerate() {
        let card = row?;
        if card.name.trim().is_empty() {
            // +2: header line and 1-based numbering
            return Err(AdvisorError::DataError {
                message: format!("empty {} on line {}", NAME_COLUMN, index + 2),
            });
        }
        cards.push(card);
    }

    Ok(Catalog::new(cards))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_rows_load_in_file_order() {
        let csv = "card_name,perks_summary\n\
                   CardA,2% groceries\n\
                   CardB,3x travel\n\
                   CardC,\"No annual fee, 1% everything\"\n";

        let catalog = read_catalog(csv.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 3);
        let names: Vec<&str> = catalog.cards().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["CardA", "CardB", "CardC"]);
        assert_eq!(catalog.cards()[2].perks_summary, "No annual fee, 1% everything");
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let csv = "issuer,card_name,annual_fee,perks_summary\n\
                   Chase,CardA,95,3x dining\n";

        let catalog = read_catalog(csv.as_bytes()).unwrap();

        assert_eq!(catalog.cards(), &[CardRecord::new("CardA", "3x dining")]);
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "card_name,annual_fee\nCardA,95\n";

        let err = read_catalog(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, AdvisorError::DataError { ref message } if message.contains("perks_summary")));
    }

    #[test]
    fn test_header_only_is_empty_catalog() {
        let catalog = read_catalog("card_name,perks_summary\n".as_bytes()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_empty_card_name_rejected() {
        let csv = "card_name,perks_summary\nCardA,cash back\n,orphan perks\n";

        let err = read_catalog(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, AdvisorError::DataError { ref message } if message.contains("line 3")));
    }

    #[test]
    fn test_ragged_row_is_data_error() {
        let csv = "card_name,perks_summary\nCardA,cash back,extra\n";

        let err = read_catalog(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, AdvisorError::DataError { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "card_name,perks_summary").unwrap();
        writeln!(file, "CardA,2% groceries").unwrap();

        let catalog = load_catalog(file.path()).unwrap();

        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_missing_file_is_data_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("credit_cards.csv");

        let err = load_catalog(&missing).unwrap_err();

        assert!(matches!(err, AdvisorError::DataError { ref message } if message.contains("not found")));
    }
}
