use crate::domain::PropertyRecord;
use maud::{html, Markup};

pub mod error;

pub use error::error_page;

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// Non-blocking notice shown above the listings when live data is unavailable.
pub fn static_data_banner(reason: Option<&str>) -> Markup {
    html! {
        div class="banner banner-warning" role="status" {
            strong { "Showing sample listings." }
            " We couldn't reach the listings service, so these homes are examples."
            @if let Some(reason) = reason {
                details {
                    summary { "Details" }
                    code { (reason) }
                }
            }
        }
    }
}

pub fn property_card(record: &PropertyRecord) -> Markup {
    let details = &record.details;

    card(
        &record.title,
        html! {
            @if !record.image.is_empty() {
                img class="card-image" src=(record.image) alt=(record.title) loading="lazy";
            }
            p class="location" { (record.location) }
            p class="price" {
                strong { (format_price(record.price)) }
                @if record.is_for_rent && !record.is_for_sale { " / month" }
                " · " (record.purpose_label())
            }
            ul class="facts" {
                li { (details.bedrooms) " bd" }
                li { (details.bathrooms) " ba" }
                li { (details.parking) " parking" }
                @if details.area > 0.0 {
                    li { (format!("{:.0}", details.area)) " m²" }
                }
            }
            @if let Some(agent) = &record.agent_info {
                p class="agent" {
                    "Listed by " (agent.name)
                    @if let Some(company) = &agent.company { ", " (company) }
                }
            }
        },
    )
}

/// `1234567.0` -> `$1,234,567`
pub fn format_price(price: f64) -> String {
    let whole = price.round().max(0.0) as u64;
    let digits = whole.to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
