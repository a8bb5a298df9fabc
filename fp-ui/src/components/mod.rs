//! Reusable Dioxus RSX components for the feeding point map.

mod bottom_sheet;
mod comments_list;
mod error_display;
mod image_carousel;
mod loading_spinner;
mod map_surface;
mod navbar;
mod rating;
mod social_actions;
mod station_card;
mod status_badge;

pub use bottom_sheet::BottomSheet;
pub use comments_list::CommentsList;
pub use error_display::ErrorDisplay;
pub use image_carousel::ImageCarousel;
pub use loading_spinner::LoadingSpinner;
pub use map_surface::MapSurface;
pub use navbar::Navbar;
pub use rating::Rating;
pub use social_actions::SocialActions;
pub use station_card::StationCard;
pub use status_badge::StatusBadge;
