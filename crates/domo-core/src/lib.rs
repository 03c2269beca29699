use serde::Deserialize;

mod display;
mod error;
mod export;
pub use display::{create_listing_table, ListingTableRow};
pub use error::{DomoError, Result};
pub use export::{export, read_csv};

/// Column names of an exported table, in output order.
pub const FIELD_NAMES: [&str; 7] = [
    "title",
    "price",
    "room_count",
    "sq_meters",
    "apartment_floor",
    "year_built",
    "link",
];

/// One apartment advertisement as it appeared on the results page.
///
/// Values are kept verbatim: prices keep their currency symbols, per-square-meter
/// breakdown and surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListingRecord {
    pub title: String,
    pub price: String,
    pub room_count: String,
    pub sq_meters: String,
    pub apartment_floor: String,
    pub year_built: String,
    pub link: String,
}

impl ListingRecord {
    /// Field values in [`FIELD_NAMES`] order.
    pub fn values(&self) -> [&str; 7] {
        [
            self.title.as_str(),
            self.price.as_str(),
            self.room_count.as_str(),
            self.sq_meters.as_str(),
            self.apartment_floor.as_str(),
            self.year_built.as_str(),
            self.link.as_str(),
        ]
    }
}

/// Rows of a scrape run in scrape order: page order, then position within the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    records: Vec<ListingRecord>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ListingRecord>) -> Self {
        Self { records }
    }

    pub fn push(&mut self, record: ListingRecord) {
        self.records.push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = ListingRecord>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ListingRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a ListingRecord;
    type IntoIter = std::slice::Iter<'a, ListingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
