//! CSV export of a ledger.

use salesrepl_core::{SaleRecord, SalesDb};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

/// Date format used in exported rows.
pub const DATE_FORMAT: &str = "%d/%m/%y";

/// Error returned when a ledger cannot be written.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The destination could not be created or written.
    #[error("{0}")]
    Io(#[from] io::Error),
    /// The CSV writer failed.
    #[error("{0}")]
    Csv(#[from] csv::Error),
}

/// Writes a ledger snapshot to tabular storage.
pub trait Exporter {
    /// Write every sale in `db` to `path` and return the number of rows written.
    fn export(&self, db: &SalesDb, path: &Path) -> Result<usize, ExportError>;
}

/// Exports to a comma separated file.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn export(&self, db: &SalesDb, path: &Path) -> Result<usize, ExportError> {
        let file = File::create(path)?;
        let rows = write_csv(db, file)?;
        tracing::info!(rows, path = %path.display(), "exported ledger");
        Ok(rows)
    }
}

/// Write `db` as CSV: a header row, then one row per sale in identifier order.
///
/// The price column holds the bare amount, without its currency, and dates are
/// written as `dd/mm/yy`.
pub fn write_csv<W: Write>(db: &SalesDb, writer: W) -> Result<usize, ExportError> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["id"];
    header.extend(SaleRecord::FIELD_NAMES);
    csv.write_record(&header)?;

    let mut rows = 0;
    for (id, sale) in db.iter() {
        csv.write_record([
            id.to_string(),
            sale.product_name.clone(),
            format!("{:?}", sale.price.value()),
            sale.quantity.to_string(),
            sale.client_id.to_string(),
            sale.employee_name.clone(),
            sale.date.format(DATE_FORMAT).to_string(),
            sale.notes.clone(),
        ])?;
        rows += 1;
    }
    csv.flush()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesrepl_core::{Money, NaiveDate};

    #[test]
    fn test_write_csv() {
        let mut db = SalesDb::new();
        db.insert(
            SaleRecord::new("orange", Money::Brl(4.0), NaiveDate::from_ymd_opt(1933, 5, 6).unwrap())
                .with_quantity(88)
                .with_client(111_111_111)
                .with_employee("Amanda")
                .with_notes("Fresh, ripe"),
        );

        let mut out = Vec::new();
        assert_eq!(write_csv(&db, &mut out).unwrap(), 1);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "id,product_name,price,quantity,client_id,employee_name,date,notes\n\
             1,orange,4.0,88,111111111,Amanda,06/05/33,\"Fresh, ripe\"\n"
        );
    }

    #[test]
    fn test_write_empty() {
        let mut out = Vec::new();
        assert_eq!(write_csv(&SalesDb::new(), &mut out).unwrap(), 0);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id,product_name,price,quantity,client_id,employee_name,date,notes\n"
        );
    }
}
