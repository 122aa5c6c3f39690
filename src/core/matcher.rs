use chrono::{Local, NaiveDate};

use crate::core::{age, distance, filters, ranker};
use crate::models::{Candidate, Connection, MatchCriteria, Page, UserProfile};

/// Result of one matching pass
#[derive(Debug)]
pub struct MatchResult {
    /// The requested page of ranked candidates
    pub candidates: Vec<Candidate>,
    /// Matches across all pages, before pagination
    pub total_matched: usize,
    /// Size of the candidate pool that went in
    pub total_candidates: usize,
}

/// Service-level defaults applied when a request leaves criteria unset
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchDefaults {
    pub max_distance_km: Option<f64>,
}

/// Main matching orchestrator
///
/// # Pipeline stages
/// 1. Drop the viewer, malformed records and connected users
/// 2. Attribute filters (role, gender, interests, availability, rating)
/// 3. Enrich into candidates (computed age + raw distance), apply the
///    age and distance filters with their sentinel pass-through policy
/// 4. Stable rank by ascending distance, then paginate
///
/// The whole pass is pure and deterministic: same snapshot in, same
/// sequence out. When the pool changes, callers re-run the pipeline on
/// the new snapshot rather than patching results.
#[derive(Debug, Clone)]
pub struct Matcher {
    defaults: MatchDefaults,
}

impl Matcher {
    pub fn new(defaults: MatchDefaults) -> Self {
        Self { defaults }
    }

    /// Find matches for a viewer within a candidate pool
    ///
    /// # Arguments
    /// * `viewer` - The profile the match is computed for
    /// * `candidates` - Snapshot of the candidate pool from the backend
    /// * `connections` - The viewer's existing connections
    /// * `criteria` - Filter criteria for this pass
    /// * `page` - Pagination window
    pub fn find_matches(
        &self,
        viewer: &UserProfile,
        candidates: Vec<UserProfile>,
        connections: &[Connection],
        criteria: &MatchCriteria,
        page: &Page,
    ) -> MatchResult {
        self.find_matches_on(Local::now().date_naive(), viewer, candidates, connections, criteria, page)
    }

    /// Same as [`find_matches`](Self::find_matches) with an explicit
    /// reference date for age computation
    pub fn find_matches_on(
        &self,
        today: NaiveDate,
        viewer: &UserProfile,
        candidates: Vec<UserProfile>,
        connections: &[Connection],
        criteria: &MatchCriteria,
        page: &Page,
    ) -> MatchResult {
        let total_candidates = candidates.len();
        let viewer_location = viewer.location();

        let mut criteria = criteria.clone();
        if criteria.max_distance_km.is_none() {
            criteria.max_distance_km = self.defaults.max_distance_km;
        }

        let mut matched: Vec<Candidate> = candidates
            .into_iter()
            // Stage 1: identity and relationship exclusions
            .filter(|p| p.is_well_formed() && p.user_id != viewer.user_id)
            .filter(|p| {
                !filters::is_connected(
                    &viewer.user_id,
                    &p.user_id,
                    connections,
                    criteria.include_blocked,
                )
            })
            // Stage 2: attribute filters
            .filter(|p| filters::matches_role(p, &criteria))
            .filter(|p| filters::matches_gender(p, &criteria))
            .filter(|p| filters::shares_interest(p, &criteria))
            .filter(|p| filters::shares_availability(p, &criteria))
            .filter(|p| filters::meets_rating(p, &criteria))
            // Stage 3: computed fields with sentinel pass-through
            .filter_map(|p| {
                let age = p.dob.and_then(|dob| age::age_on(dob, today));
                if !filters::matches_age(age, &criteria) {
                    return None;
                }

                let distance_km = distance::distance_between(viewer_location, p.location());
                if !filters::within_distance(distance_km, &criteria) {
                    return None;
                }

                Some(Candidate {
                    user_id: p.user_id,
                    name: p.name,
                    age,
                    gender: p.gender,
                    role: p.role,
                    interests: p.interests,
                    availability: p.availability,
                    fitness_level: p.fitness_level,
                    rating: p.rating,
                    distance_km,
                })
            })
            .collect();

        // Stage 4: rank and paginate
        ranker::rank(&mut matched);
        let total_matched = matched.len();
        let candidates = ranker::paginate(matched, page);

        MatchResult {
            candidates,
            total_matched,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(MatchDefaults::default())
    }
}
