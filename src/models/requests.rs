use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::MatchCriteria;

/// Request to find buddy or trainer matches for a viewer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub criteria: MatchCriteria,
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    #[serde(alias = "page_size", rename = "pageSize")]
    pub page_size: u16,
}

fn default_page_size() -> u16 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_request_gets_defaults() {
        let req: FindMatchesRequest =
            serde_json::from_str(r#"{"userId": "u1"}"#).unwrap();

        assert_eq!(req.user_id, "u1");
        assert_eq!(req.page, 0);
        assert_eq!(req.page_size, 20);
        assert!(req.criteria.max_distance_km.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_user_id_fails_validation() {
        let req: FindMatchesRequest =
            serde_json::from_str(r#"{"userId": ""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_criteria_round_trip() {
        let req: FindMatchesRequest = serde_json::from_str(
            r#"{
                "userId": "u1",
                "page": 2,
                "pageSize": 10,
                "criteria": {
                    "maxDistanceKm": 25.0,
                    "ageRange": [18, 65],
                    "requiredInterests": ["Yoga"],
                    "minRating": 4.0
                }
            }"#,
        )
        .unwrap();

        assert_eq!(req.criteria.max_distance_km, Some(25.0));
        assert_eq!(req.criteria.age_range, Some((18, 65)));
        assert_eq!(req.criteria.required_interests, vec!["Yoga"]);
        assert_eq!(req.criteria.min_rating, 4.0);
    }
}
