//! The eight page behaviors. Each module has a `setup` that finds its
//! elements from the config and a `wire` that takes them explicitly.

pub mod anchors;
pub mod back_to_top;
pub mod fade_in;
pub mod lazy_images;
pub mod menu_items;
pub mod mobile_menu;
pub mod newsletter;
pub mod reservation;
