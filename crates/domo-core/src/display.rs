use crate::{ListingRecord, ResultTable};
use tabled::settings::{object::Columns, Modify, Style, Width};
use tabled::{Table, Tabled};

#[derive(Tabled)]
pub struct ListingTableRow {
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Price")]
    pub price: String,
    #[tabled(rename = "Rooms", display_with = "display_right_8")]
    pub room_count: String,
    #[tabled(rename = "Area", display_with = "display_right_10")]
    pub sq_meters: String,
    #[tabled(rename = "Floor", display_with = "display_right_8")]
    pub apartment_floor: String,
    #[tabled(rename = "Built", display_with = "display_right_8")]
    pub year_built: String,
}

fn display_right_8(s: &str) -> String {
    format!("{:>8}", s)
}

fn display_right_10(s: &str) -> String {
    format!("{:>10}", s)
}

/// Collapses runs of whitespace (including the newlines the site puts around prices).
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl ListingTableRow {
    pub fn from_record(record: &ListingRecord) -> Self {
        Self {
            title: single_line(&record.title),
            price: single_line(&record.price),
            room_count: single_line(&record.room_count),
            sq_meters: single_line(&record.sq_meters),
            apartment_floor: single_line(&record.apartment_floor),
            year_built: single_line(&record.year_built),
        }
    }
}

pub fn create_listing_table(table: &ResultTable) -> String {
    let rows: Vec<ListingTableRow> = table.iter().map(ListingTableRow::from_record).collect();

    let mut rendered = Table::new(&rows);
    rendered
        .with(Style::modern())
        .with(Modify::new(Columns::single(0)).with(Width::truncate(50))) // Title column
        .with(Modify::new(Columns::single(1)).with(Width::wrap(32))); // Price column

    rendered.to_string()
}
