use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Role tag distinguishing peer users from trainers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buddy,
    Trainer,
}

/// Self-reported fitness level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// User profile with demographic, location and activity data
///
/// Profiles come from the Appwrite backend as-is. Coordinates and date of
/// birth are optional: a profile without them still participates in
/// matching, it just bypasses the distance and age filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub availability: Vec<String>,
    #[serde(rename = "fitnessLevel", default)]
    pub fitness_level: Option<FitnessLevel>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default = "default_role")]
    pub role: Role,
}

impl UserProfile {
    /// Coordinates as a pair, present only when both components are set
    pub fn location(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// A profile the matcher can work with: non-empty identifier
    pub fn is_well_formed(&self) -> bool {
        !self.user_id.is_empty()
    }
}

fn default_role() -> Role {
    Role::Buddy
}

/// Accept a date of birth as `YYYY-MM-DD` or a full RFC 3339 timestamp;
/// anything unparseable becomes `None` instead of failing the record.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_dob))
}

fn parse_dob(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        chrono::DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.date_naive())
    })
}

/// Status of a pairwise connection between two users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Blocked,
    Rejected,
}

/// Pairwise relationship between two users, read-only for matching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    #[serde(rename = "senderId")]
    pub sender_id: String,
    #[serde(rename = "receiverId")]
    pub receiver_id: String,
    pub status: ConnectionStatus,
}

impl Connection {
    /// True when this connection joins the two given users, in either direction
    pub fn links(&self, a: &str, b: &str) -> bool {
        (self.sender_id == a && self.receiver_id == b)
            || (self.sender_id == b && self.receiver_id == a)
    }
}

/// Filter criteria for a single matching pass
///
/// Every field defaults to match-all; a default `MatchCriteria` passes
/// every candidate through.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchCriteria {
    #[serde(rename = "maxDistanceKm", default)]
    pub max_distance_km: Option<f64>,
    #[serde(rename = "ageRange", default)]
    pub age_range: Option<(u8, u8)>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(rename = "requiredInterests", default)]
    pub required_interests: Vec<String>,
    #[serde(rename = "requiredAvailability", default)]
    pub required_availability: Vec<String>,
    #[serde(rename = "minRating", default)]
    pub min_rating: f64,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(rename = "includeBlocked", default)]
    pub include_blocked: bool,
}

/// Numeric pagination window: `page * page_size` slicing, no cursor state
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub page: usize,
    pub page_size: usize,
}

/// A profile enriched with computed age and distance for one matching pass
///
/// Transient: built per request, never persisted. `distance_km` keeps the
/// unrounded value so the ranker sorts on full precision; rounding to one
/// decimal happens at serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    pub age: Option<u8>,
    pub gender: Option<String>,
    pub role: Role,
    pub interests: Vec<String>,
    pub availability: Vec<String>,
    #[serde(rename = "fitnessLevel")]
    pub fitness_level: Option<FitnessLevel>,
    pub rating: f64,
    #[serde(rename = "distanceKm", serialize_with = "serialize_rounded_km")]
    pub distance_km: Option<f64>,
}

fn serialize_rounded_km<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(km) => serializer.serialize_some(&crate::core::distance::round_for_display(*km)),
        None => serializer.serialize_none(),
    }
}

/// Geospatial bounding box used to pre-filter backend candidate queries
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_requires_both_coordinates() {
        let mut profile = UserProfile {
            user_id: "u1".to_string(),
            name: "Test".to_string(),
            dob: None,
            gender: None,
            latitude: Some(52.0),
            longitude: None,
            interests: vec![],
            availability: vec![],
            fitness_level: None,
            rating: 0.0,
            role: Role::Buddy,
        };

        assert!(profile.location().is_none());

        profile.longitude = Some(4.9);
        assert_eq!(profile.location(), Some((52.0, 4.9)));
    }

    #[test]
    fn test_connection_links_both_directions() {
        let conn = Connection {
            sender_id: "a".to_string(),
            receiver_id: "b".to_string(),
            status: ConnectionStatus::Accepted,
        };

        assert!(conn.links("a", "b"));
        assert!(conn.links("b", "a"));
        assert!(!conn.links("a", "c"));
    }

    #[test]
    fn test_profile_deserializes_with_missing_optionals() {
        let json = r#"{"userId": "u1", "name": "Sam", "role": "trainer"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.user_id, "u1");
        assert_eq!(profile.role, Role::Trainer);
        assert!(profile.dob.is_none());
        assert!(profile.location().is_none());
        assert_eq!(profile.rating, 0.0);
    }

    #[test]
    fn test_invalid_dob_becomes_none() {
        let json = r#"{"userId": "u1", "name": "Sam", "dob": "not-a-date"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert!(profile.dob.is_none());

        let json = r#"{"userId": "u1", "name": "Sam", "dob": "1990-06-15"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.dob, NaiveDate::from_ymd_opt(1990, 6, 15));
    }

    #[test]
    fn test_dob_accepts_rfc3339_timestamp() {
        let json = r#"{"userId": "u1", "name": "Sam", "dob": "1990-06-15T00:00:00.000+00:00"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.dob, NaiveDate::from_ymd_opt(1990, 6, 15));
    }

    #[test]
    fn test_candidate_distance_rounds_on_serialize() {
        let candidate = Candidate {
            user_id: "u1".to_string(),
            name: "Sam".to_string(),
            age: Some(30),
            gender: None,
            role: Role::Buddy,
            interests: vec![],
            availability: vec![],
            fitness_level: None,
            rating: 4.5,
            distance_km: Some(12.3456),
        };

        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["distanceKm"], serde_json::json!(12.3));
    }

    #[test]
    fn test_default_criteria_is_match_all() {
        let criteria = MatchCriteria::default();
        assert!(criteria.max_distance_km.is_none());
        assert!(criteria.age_range.is_none());
        assert!(criteria.required_interests.is_empty());
        assert_eq!(criteria.min_rating, 0.0);
        assert!(!criteria.include_blocked);
    }
}
