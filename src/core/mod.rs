// Core algorithm exports
pub mod age;
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod ranker;

pub use age::{age_now, age_on};
pub use distance::{calculate_bounding_box, distance_between, haversine_distance, round_for_display};
pub use filters::{is_connected, matches_age, matches_gender, matches_role, meets_rating, shares_availability, shares_interest, within_distance};
pub use matcher::{MatchDefaults, MatchResult, Matcher};
pub use ranker::{paginate, rank};
