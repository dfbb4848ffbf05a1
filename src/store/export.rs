use std::path::Path;

use super::Store;
use crate::error::Result;

impl Store {
    /// Write the loaded expenses to a CSV file. Rows excluded on load are
    /// not exported. Returns the number of rows written.
    pub(crate) fn export_csv(&self, path: &Path) -> Result<usize> {
        let table = self.load_expenses()?;
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(["Date", "Category", "Description", "Amount"])?;
        for e in &table.rows {
            wtr.write_record([
                e.date.format("%Y-%m-%d").to_string(),
                e.category.to_string(),
                e.description.clone(),
                format!("{:.2}", e.amount),
            ])?;
        }
        wtr.flush()?;
        Ok(table.rows.len())
    }
}
