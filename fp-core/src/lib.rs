pub mod comment;
pub mod details;
pub mod station;

pub use comment::Comment;
pub use details::{DetailExtras, PointDetailsData, PointStatus, PointType};
pub use station::{NewStation, Station, StationPatch, StationStatus};
