// src/domain/catalog.rs

use crate::domain::property::{PropertyDetails, PropertyRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// Denormalized sample listing served by `/api/static-properties`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticProperty {
    pub title: String,
    pub address: String,
    pub price: f64,
    pub is_for_rent: bool,
    pub is_for_sale: bool,
    pub area: f64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub parking: i64,
    pub images: Vec<String>,
    pub coordinates: Coordinates,
    pub description: String,
    pub facilities: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

struct Seed {
    id: i64,
    title: &'static str,
    address: &'static str,
    price: f64,
    for_rent: bool,
    area: f64,
    rooms: (i64, i64, i64),
    image: &'static str,
    coordinates: (f64, f64),
    description: &'static str,
    facilities: &'static [&'static str],
}

const SEEDS: &[Seed] = &[
    Seed {
        id: 1,
        title: "Modern Family Home",
        address: "1420 Larkspur Lane, Austin, TX",
        price: 485_000.0,
        for_rent: false,
        area: 210.0,
        rooms: (4, 3, 2),
        image: "/static/samples/larkspur.svg",
        coordinates: (30.2672, -97.7431),
        description: "Open-plan living with a renovated kitchen and a shaded backyard.",
        facilities: &["Garden", "Garage", "Central Air"],
    },
    Seed {
        id: 2,
        title: "Downtown Loft",
        address: "88 Market Street, Unit 12B, Denver, CO",
        price: 2_350.0,
        for_rent: true,
        area: 95.0,
        rooms: (1, 1, 1),
        image: "/static/samples/market-loft.svg",
        coordinates: (39.7392, -104.9903),
        description: "Exposed brick, tall windows, and a short walk to light rail.",
        facilities: &["Gym", "Rooftop Deck", "Elevator"],
    },
    Seed {
        id: 3,
        title: "Lakeside Cottage",
        address: "7 Heron Point Road, Madison, WI",
        price: 329_900.0,
        for_rent: false,
        area: 140.0,
        rooms: (3, 2, 1),
        image: "/static/samples/heron-point.svg",
        coordinates: (43.0731, -89.4012),
        description: "Private dock and a sunroom facing the water.",
        facilities: &["Fireplace", "Dock", "Garden"],
    },
    Seed {
        id: 4,
        title: "Suburban Townhouse",
        address: "2215 Willow Creek Drive, Raleigh, NC",
        price: 1_875.0,
        for_rent: true,
        area: 130.0,
        rooms: (3, 2, 2),
        image: "/static/samples/willow-creek.svg",
        coordinates: (35.7796, -78.6382),
        description: "End unit with a fenced patio near parks and schools.",
        facilities: &["Patio", "Pool", "Playground"],
    },
];

impl Seed {
    fn to_static(&self) -> StaticProperty {
        let (bedrooms, bathrooms, parking) = self.rooms;
        StaticProperty {
            title: self.title.to_string(),
            address: self.address.to_string(),
            price: self.price,
            is_for_rent: self.for_rent,
            is_for_sale: !self.for_rent,
            area: self.area,
            bedrooms,
            bathrooms,
            parking,
            images: vec![self.image.to_string()],
            coordinates: Coordinates {
                lat: self.coordinates.0,
                lng: self.coordinates.1,
            },
            description: self.description.to_string(),
            facilities: self.facilities.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Seed data keyed by property id.
pub fn static_property_catalog() -> BTreeMap<String, StaticProperty> {
    SEEDS
        .iter()
        .map(|seed| (seed.id.to_string(), seed.to_static()))
        .collect()
}

/// The fixed fallback set used when no live data can be obtained.
/// Built from the same seeds as the catalog, in id order.
pub fn static_properties() -> Vec<PropertyRecord> {
    SEEDS
        .iter()
        .map(|seed| {
            let item = seed.to_static();
            PropertyRecord {
                id: seed.id,
                title: item.title,
                location: item.address,
                price: item.price,
                is_for_rent: item.is_for_rent,
                is_for_sale: item.is_for_sale,
                details: PropertyDetails {
                    area: item.area,
                    bedrooms: item.bedrooms,
                    bathrooms: item.bathrooms,
                    parking: item.parking,
                },
                image: item.images.into_iter().next().unwrap_or_default(),
                description: item.description,
                facilities: item.facilities,
                agent_info: None,
            }
        })
        .collect()
}
