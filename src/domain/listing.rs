// src/domain/listing.rs

use crate::domain::property::PropertyRecord;
use std::collections::HashMap;

pub const DEFAULT_PER_PAGE: usize = 9;
const MAX_PER_PAGE: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Purpose {
    #[default]
    Any,
    Rent,
    Sale,
}

/// Browse-page predicates and paging, parsed from the query string.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    pub search: Option<String>,
    pub purpose: Purpose,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_bedrooms: Option<i64>,
    /// 1-based.
    pub page: usize,
    pub per_page: usize,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            search: None,
            purpose: Purpose::Any,
            min_price: None,
            max_price: None,
            min_bedrooms: None,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

#[derive(Debug)]
pub struct ListingPage<'a> {
    pub items: Vec<&'a PropertyRecord>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

impl ListingQuery {
    /// Unknown keys and unparseable values are ignored.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let get = |key: &str| params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let defaults = Self::default();

        Self {
            search: get("q").map(str::to_string),
            purpose: match get("purpose") {
                Some("rent") => Purpose::Rent,
                Some("sale") => Purpose::Sale,
                _ => Purpose::Any,
            },
            min_price: get("min_price").and_then(|v| v.parse().ok()),
            max_price: get("max_price").and_then(|v| v.parse().ok()),
            min_bedrooms: get("bedrooms").and_then(|v| v.parse().ok()),
            page: get("page")
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|p| *p > 0)
                .unwrap_or(defaults.page),
            per_page: get("per_page")
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|p| *p > 0)
                .map(|p| p.min(MAX_PER_PAGE))
                .unwrap_or(defaults.per_page),
        }
    }

    pub fn matches(&self, record: &PropertyRecord) -> bool {
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            if !record.title.to_lowercase().contains(&term)
                && !record.location.to_lowercase().contains(&term)
            {
                return false;
            }
        }

        let purpose_ok = match self.purpose {
            Purpose::Any => true,
            Purpose::Rent => record.is_for_rent,
            Purpose::Sale => record.is_for_sale,
        };

        purpose_ok
            && self.min_price.map_or(true, |min| record.price >= min)
            && self.max_price.map_or(true, |max| record.price <= max)
            && self
                .min_bedrooms
                .map_or(true, |beds| record.details.bedrooms >= beds)
    }

    /// Query string for the same filters on another page, without the leading `?`.
    pub fn to_query_string(&self, page: usize) -> String {
        let mut out = url::form_urlencoded::Serializer::new(String::new());

        if let Some(term) = &self.search {
            out.append_pair("q", term);
        }
        match self.purpose {
            Purpose::Any => {}
            Purpose::Rent => {
                out.append_pair("purpose", "rent");
            }
            Purpose::Sale => {
                out.append_pair("purpose", "sale");
            }
        }
        if let Some(min) = self.min_price {
            out.append_pair("min_price", &min.to_string());
        }
        if let Some(max) = self.max_price {
            out.append_pair("max_price", &max.to_string());
        }
        if let Some(beds) = self.min_bedrooms {
            out.append_pair("bedrooms", &beds.to_string());
        }
        if self.per_page != DEFAULT_PER_PAGE {
            out.append_pair("per_page", &self.per_page.to_string());
        }
        out.append_pair("page", &page.to_string());

        out.finish()
    }

    /// Filters then slices. The requested page is clamped into range.
    pub fn apply<'a>(&self, records: &'a [PropertyRecord]) -> ListingPage<'a> {
        let matching: Vec<&PropertyRecord> = records.iter().filter(|r| self.matches(r)).collect();

        let per_page = self.per_page.max(1);
        let total = matching.len();
        let total_pages = total.div_ceil(per_page).max(1);
        let page = self.page.clamp(1, total_pages);

        let items = matching
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .collect();

        ListingPage {
            items,
            page,
            total_pages,
            total,
        }
    }
}
