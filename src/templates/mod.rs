pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{property_card, static_data_banner};
pub use layouts::desktop::desktop_layout;
