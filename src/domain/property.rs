// src/domain/property.rs

use crate::backend::{AgentRow, PropertyDetailRow, PropertyRow};
use serde::Serialize;

/// The unified listing shape served to pages and the JSON API.
/// This acts as an anti-corruption layer between the backend tables and the views.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub id: i64,
    pub title: String,
    pub location: String,
    pub price: f64,
    pub is_for_rent: bool,
    pub is_for_sale: bool,
    pub details: PropertyDetails,
    pub image: String,
    pub description: String,
    pub facilities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_info: Option<AgentInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertyDetails {
    pub area: f64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub parking: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentInfo {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub avatar: Option<String>,
}

impl From<AgentRow> for AgentInfo {
    fn from(row: AgentRow) -> Self {
        Self {
            name: row.full_name.unwrap_or_else(|| "Listing agent".to_string()),
            id: row.id,
            email: row.email,
            phone: row.phone,
            company: row.company,
            avatar: row.avatar_url,
        }
    }
}

impl PropertyRecord {
    /// Joins a base row with its detail rows and optional agent.
    ///
    /// Returns `None` when there are no detail rows: a listing without
    /// details is never shown. With several detail rows, each numeric field
    /// comes from the first row that has it and facilities are merged in
    /// encounter order without duplicates.
    pub fn assemble(
        base: PropertyRow,
        details: &[PropertyDetailRow],
        agent: Option<AgentRow>,
    ) -> Option<Self> {
        if details.is_empty() {
            return None;
        }

        let first = |f: fn(&PropertyDetailRow) -> Option<i64>| details.iter().find_map(f);

        let merged = PropertyDetails {
            area: details.iter().find_map(|d| d.area).unwrap_or_default(),
            bedrooms: first(|d| d.bedrooms).unwrap_or_default(),
            bathrooms: first(|d| d.bathrooms).unwrap_or_default(),
            parking: first(|d| d.parking).unwrap_or_default(),
        };

        let description = details
            .iter()
            .find_map(|d| d.description.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or_default()
            .to_string();

        let mut facilities: Vec<String> = Vec::new();
        for facility in details.iter().filter_map(|d| d.facilities.as_ref()).flatten() {
            if !facilities.contains(facility) {
                facilities.push(facility.clone());
            }
        }

        let image = base
            .image
            .filter(|s| !s.is_empty())
            .or_else(|| {
                details
                    .iter()
                    .filter_map(|d| d.images.as_ref())
                    .flatten()
                    .find(|s| !s.is_empty())
                    .cloned()
            })
            .unwrap_or_default();

        Some(PropertyRecord {
            id: base.id,
            title: base.title.unwrap_or_default(),
            location: base.location.unwrap_or_default(),
            price: base.price.unwrap_or_default(),
            is_for_rent: base.is_for_rent.unwrap_or_default(),
            is_for_sale: base.is_for_sale.unwrap_or_default(),
            details: merged,
            image,
            description,
            facilities,
            agent_info: agent.map(AgentInfo::from),
        })
    }

    pub fn purpose_label(&self) -> &'static str {
        match (self.is_for_rent, self.is_for_sale) {
            (true, true) => "For rent or sale",
            (true, false) => "For rent",
            (false, true) => "For sale",
            (false, false) => "Off market",
        }
    }
}
