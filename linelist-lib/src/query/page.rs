//! Page type for paginated query results.

/// A page of query results.
///
/// When iterating over list results, each page carries a batch of records
/// together with the offset it was fetched at.
///
/// # Example
///
/// ```ignore
/// let mut pages = client.pages("cases", &query, 50);
///
/// while let Some(page) = pages.next().await {
///     let page = page?;
///     println!("{} records at offset {}", page.len(), page.offset());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Page {
    records: Vec<serde_json::Value>,
    /// Offset this page was fetched at.
    offset: u64,
}

impl Page {
    /// Creates a new page from records and the offset they were fetched at.
    pub fn new(records: Vec<serde_json::Value>, offset: u64) -> Self {
        Self { records, offset }
    }

    /// Returns a reference to the records in this page.
    pub fn records(&self) -> &[serde_json::Value] {
        &self.records
    }

    /// Consumes the page and returns the records.
    pub fn into_records(self) -> Vec<serde_json::Value> {
        self.records
    }

    /// Returns the offset this page was fetched at.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
