use anyhow::Result;
use std::collections::HashMap;

use crate::table::ResultTable;

/// Occurrences of each full PEP status seen during a scan.
#[derive(Debug, Default)]
pub struct StatusTally {
    counts: HashMap<String, u32>,
}

impl StatusTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, status: &str) {
        *self.counts.entry(status.to_string()).or_insert(0) += 1;
    }

    pub fn count(&self, status: &str) -> u32 {
        self.counts.get(status).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// `(Status, Total)` rows, most frequent first, closed by a `Total` row.
    pub fn into_table(self) -> Result<ResultTable> {
        let total = self.total();
        let mut sorted: Vec<(String, u32)> = self.counts.into_iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut table = ResultTable::new(["Status", "Total"]);
        for (status, count) in sorted {
            table.push([status, count.to_string()])?;
        }
        table.push(["Total".to_string(), total.to_string()])?;
        Ok(table)
    }
}
