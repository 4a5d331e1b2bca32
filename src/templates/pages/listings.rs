// templates/pages/listings.rs

use crate::domain::{ListingPage, ListingQuery, Purpose};
use crate::templates::{desktop_layout, property_card, static_data_banner};
use maud::{html, Markup};

pub struct ListingsVm<'a> {
    pub query: &'a ListingQuery,
    pub page: ListingPage<'a>,
    pub is_static: bool,
    pub fallback_reason: Option<&'a str>,
}

pub fn listings_page(vm: &ListingsVm) -> Markup {
    desktop_layout(
        "Browse homes",
        html! {
            main class="container" {
                h1 { "Browse homes" }

                @if vm.is_static {
                    (static_data_banner(vm.fallback_reason))
                }

                (filter_form(vm.query))

                p class="result-count" {
                    (vm.page.total) " "
                    @if vm.page.total == 1 { "home" } @else { "homes" }
                    " found"
                }

                @if vm.page.items.is_empty() {
                    p class="empty" { "No homes match these filters." }
                } @else {
                    section class="grid" {
                        @for record in &vm.page.items {
                            (property_card(record))
                        }
                    }
                }

                (pagination(vm))
            }
        },
    )
}

fn filter_form(query: &ListingQuery) -> Markup {
    let price = |v: Option<f64>| v.map(|p| format!("{p:.0}")).unwrap_or_default();

    html! {
        form class="filters" method="get" action="/properties" {
            input type="search" name="q" placeholder="City or title"
                value=(query.search.as_deref().unwrap_or_default());

            select name="purpose" {
                option value="" selected[query.purpose == Purpose::Any] { "Rent or buy" }
                option value="rent" selected[query.purpose == Purpose::Rent] { "For rent" }
                option value="sale" selected[query.purpose == Purpose::Sale] { "For sale" }
            }

            input type="number" name="min_price" min="0" placeholder="Min price"
                value=(price(query.min_price));
            input type="number" name="max_price" min="0" placeholder="Max price"
                value=(price(query.max_price));
            input type="number" name="bedrooms" min="0" placeholder="Bedrooms"
                value=(query.min_bedrooms.map(|b| b.to_string()).unwrap_or_default());

            button class="btn" type="submit" { "Search" }
        }
    }
}

fn pagination(vm: &ListingsVm) -> Markup {
    let current = vm.page.page;
    let last = vm.page.total_pages;

    html! {
        @if last > 1 {
            nav class="pagination" {
                @if current > 1 {
                    a href={ "/properties?" (vm.query.to_query_string(current - 1)) } { "← Previous" }
                }
                span { "Page " (current) " of " (last) }
                @if current < last {
                    a href={ "/properties?" (vm.query.to_query_string(current + 1)) } { "Next →" }
                }
            }
        }
    }
}
