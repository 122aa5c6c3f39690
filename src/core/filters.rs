use crate::models::{Connection, ConnectionStatus, MatchCriteria, UserProfile};

/// Check a profile against the gender filter
///
/// An unset or empty filter matches everyone; a profile without a gender
/// only matches the empty filter.
#[inline]
pub fn matches_gender(profile: &UserProfile, criteria: &MatchCriteria) -> bool {
    match criteria.gender.as_deref() {
        None | Some("") => true,
        Some(wanted) => profile.gender.as_deref() == Some(wanted),
    }
}

/// Check a computed age against the age range
///
/// The "unknown age" sentinel (`None`) always passes.
#[inline]
pub fn matches_age(age: Option<u8>, criteria: &MatchCriteria) -> bool {
    match (age, criteria.age_range) {
        (Some(age), Some((min, max))) => age >= min && age <= max,
        _ => true,
    }
}

/// Check a computed distance against the distance threshold
///
/// The "distance unavailable" sentinel (`None`) always passes.
#[inline]
pub fn within_distance(distance_km: Option<f64>, criteria: &MatchCriteria) -> bool {
    match (distance_km, criteria.max_distance_km) {
        (Some(d), Some(max)) => d <= max,
        _ => true,
    }
}

/// At least one interest in common with the required set, if non-empty
#[inline]
pub fn shares_interest(profile: &UserProfile, criteria: &MatchCriteria) -> bool {
    criteria.required_interests.is_empty()
        || profile
            .interests
            .iter()
            .any(|i| criteria.required_interests.contains(i))
}

/// At least one availability slot in common with the required set, if non-empty
#[inline]
pub fn shares_availability(profile: &UserProfile, criteria: &MatchCriteria) -> bool {
    criteria.required_availability.is_empty()
        || profile
            .availability
            .iter()
            .any(|a| criteria.required_availability.contains(a))
}

/// Rating at or above the minimum
///
/// Unrated profiles carry the 0.0 sentinel, so any positive minimum
/// excludes them. That is deliberate, not accidental.
#[inline]
pub fn meets_rating(profile: &UserProfile, criteria: &MatchCriteria) -> bool {
    profile.rating >= criteria.min_rating
}

/// Restrict to a role (buddy vs. trainer listing) when one is set
#[inline]
pub fn matches_role(profile: &UserProfile, criteria: &MatchCriteria) -> bool {
    match criteria.role {
        Some(role) => profile.role == role,
        None => true,
    }
}

/// Whether an existing connection excludes a candidate from matching
///
/// A connection in either direction excludes regardless of status. With
/// `include_blocked` set, blocked connections are re-offered as potential
/// candidates; pending, accepted and rejected ones stay excluded.
#[inline]
pub fn is_connected(
    viewer_id: &str,
    candidate_id: &str,
    connections: &[Connection],
    include_blocked: bool,
) -> bool {
    connections.iter().any(|conn| {
        conn.links(viewer_id, candidate_id)
            && !(include_blocked && conn.status == ConnectionStatus::Blocked)
    })
}
