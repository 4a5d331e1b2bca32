use serde::Deserialize;

// properties
//  ├── id
//  ├── title, location, price
//  ├── is_for_rent, is_for_sale
//  ├── image
//  └── agent_id ──► profiles.id
//
// property_details
//  ├── property_id ──► properties.id
//  ├── area, bedrooms, bathrooms, parking
//  ├── description
//  ├── facilities[]
//  └── images[]

// Every column but `id` is nullable in the backend; defaults are applied
// when a row is assembled into a `PropertyRecord`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PropertyRow {
    pub id: i64,
    pub title: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub is_for_rent: Option<bool>,
    pub is_for_sale: Option<bool>,
    pub image: Option<String>,
    pub agent_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PropertyDetailRow {
    pub property_id: i64,
    pub area: Option<f64>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub parking: Option<i64>,
    pub description: Option<String>,
    // Postgres arrays come back as null when unset.
    #[serde(default)]
    pub facilities: Option<Vec<String>>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AgentRow {
    pub id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub avatar_url: Option<String>,
}
