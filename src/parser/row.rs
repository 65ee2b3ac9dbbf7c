use serde::{Deserialize, Serialize};

/// One table row of extracted text cells.
///
/// Cells are trimmed on construction. Column meaning is positional and
/// depends on the table layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    /// Creates a row, trimming every cell.
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            cells: cells
                .into_iter()
                .map(|cell| cell.as_ref().trim().to_string())
                .collect(),
        }
    }

    /// Returns the cell at `index`, or `""` if the row is shorter.
    #[must_use]
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map_or("", String::as_str)
    }

    /// The number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in column order.
    #[must_use]
    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

impl From<Vec<String>> for Row {
    fn from(cells: Vec<String>) -> Self {
        Self::new(cells)
    }
}

impl<const N: usize> From<[&str; N]> for Row {
    fn from(cells: [&str; N]) -> Self {
        Self::new(cells)
    }
}

impl From<Row> for Vec<String> {
    fn from(row: Row) -> Self {
        row.cells
    }
}
