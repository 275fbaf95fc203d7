use anyhow::Result;

use crate::error::ScrapeError;

/// Header-first table of display strings. Every row has the header's arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ResultTable {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push<I, S>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = row.into_iter().map(Into::into).collect();
        if row.len() != self.header.len() {
            return Err(ScrapeError::RowArity {
                expected: self.header.len(),
                found: row.len(),
            }
            .into());
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows, header excluded.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header followed by every data row.
    pub fn iter(&self) -> impl Iterator<Item = &[String]> {
        std::iter::once(self.header.as_slice()).chain(self.rows.iter().map(Vec::as_slice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_comes_first() {
        let mut table = ResultTable::new(["Status", "Total"]);
        table.push(["Final", "3"]).unwrap();

        let all: Vec<&[String]> = table.iter().collect();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], ["Status", "Total"]);
        assert_eq!(all[1], ["Final", "3"]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn rejects_rows_of_wrong_arity() {
        let mut table = ResultTable::new(["Link", "Version", "Status"]);
        let err = table.push(["only", "two"]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScrapeError>(),
            Some(ScrapeError::RowArity { expected: 3, found: 2 })
        ));
        assert!(table.is_empty());
    }
}
