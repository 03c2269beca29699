use domo_core::{DomoError, ListingRecord, Result};
use scraper::{ElementRef, Html, Selector};

pub const CONTAINER_SELECTOR: &str = "ul.auto-list";
pub const ENTRY_SELECTOR: &str = "li.not-viewed";
pub const TITLE_SELECTOR: &str = "h2.title-list";
pub const PRICE_SELECTOR: &str = "div.price";
pub const ATTRIBUTE_SELECTOR: &str = "span[title]";
pub const LINK_SELECTOR: &str = "a";

pub const ROOM_COUNT_LABEL: &str = "Kambarių skaičius";
pub const AREA_LABEL: &str = "Buto plotas (kv. m)";
pub const FLOOR_LABEL: &str = "Aukštas";
pub const BUILD_YEAR_LABEL: &str = "Statybos metai";

/// One parsed page of search results
pub struct ListingPage {
    document: Html,
}

impl ListingPage {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    pub fn document(&self) -> &Html {
        &self.document
    }
}

/// A single advertisement inside a [`ListingPage`].
pub type ListingEntry<'a> = ElementRef<'a>;

#[derive(Debug, Clone)]
pub struct ListingSelectors {
    pub container: Selector,
    pub entry: Selector,
    pub title: Selector,
    pub price: Selector,
    pub attribute: Selector,
    pub link: Selector,
}

impl ListingSelectors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            container: parse_selector(CONTAINER_SELECTOR)?,
            entry: parse_selector(ENTRY_SELECTOR)?,
            title: parse_selector(TITLE_SELECTOR)?,
            price: parse_selector(PRICE_SELECTOR)?,
            attribute: parse_selector(ATTRIBUTE_SELECTOR)?,
            link: parse_selector(LINK_SELECTOR)?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| DomoError::InvalidSelector(format!("{}: {}", selector, e)))
}

/// Listing entries of `page` in document order.
///
/// A page without the listings container (an error page, a changed layout or
/// the end of the results) yields no entries.
pub fn locate_listings<'a>(page: &'a ListingPage, selectors: &ListingSelectors) -> Vec<ListingEntry<'a>> {
    match page.document().select(&selectors.container).next() {
        Some(container) => container.select(&selectors.entry).collect(),
        None => Vec::new(),
    }
}

/// Pulls the raw text of each field out of a listing entry.
///
/// Every lookup requires its element to exist; a missing element is a
/// [`DomoError::FieldNotFound`], never an empty string.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    selectors: ListingSelectors,
}

impl FieldExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            selectors: ListingSelectors::new()?,
        })
    }

    pub fn locate<'a>(&self, page: &'a ListingPage) -> Vec<ListingEntry<'a>> {
        locate_listings(page, &self.selectors)
    }

    pub fn title(&self, entry: ListingEntry<'_>) -> Result<String> {
        entry
            .select(&self.selectors.title)
            .next()
            .map(|el| el.text().collect::<String>())
            .ok_or_else(|| DomoError::field_not_found("title", TITLE_SELECTOR))
    }

    /// Untrimmed price text, e.g. `"\nKaina: 250 000 € (2 778 €/m²)\n\n"`.
    pub fn price(&self, entry: ListingEntry<'_>) -> Result<String> {
        entry
            .select(&self.selectors.price)
            .next()
            .map(|el| el.text().collect::<String>())
            .ok_or_else(|| DomoError::field_not_found("price", PRICE_SELECTOR))
    }

    /// Text of the first span whose `title` attribute equals `label` exactly.
    pub fn attribute(&self, entry: ListingEntry<'_>, label: &str) -> Result<String> {
        entry
            .select(&self.selectors.attribute)
            .find(|el| el.value().attr("title") == Some(label))
            .map(|el| el.text().collect::<String>())
            .ok_or_else(|| DomoError::field_not_found(label, &format!("span[title=\"{}\"]", label)))
    }

    pub fn link(&self, entry: ListingEntry<'_>) -> Result<String> {
        let anchor = entry
            .select(&self.selectors.link)
            .next()
            .ok_or_else(|| DomoError::field_not_found("link", LINK_SELECTOR))?;

        anchor
            .value()
            .attr("href")
            .map(str::to_string)
            .ok_or_else(|| DomoError::field_not_found("link", "a[href]"))
    }

    pub fn record(&self, entry: ListingEntry<'_>) -> Result<ListingRecord> {
        Ok(ListingRecord {
            title: self.title(entry)?,
            price: self.price(entry)?,
            room_count: self.attribute(entry, ROOM_COUNT_LABEL)?,
            sq_meters: self.attribute(entry, AREA_LABEL)?,
            apartment_floor: self.attribute(entry, FLOOR_LABEL)?,
            year_built: self.attribute(entry, BUILD_YEAR_LABEL)?,
            link: self.link(entry)?,
        })
    }
}
