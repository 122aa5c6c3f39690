use std::cmp::Ordering;

use crate::models::{Candidate, Page};

/// Sort candidates by ascending distance
///
/// The sort is stable: ties keep their input order, and candidates with
/// the "distance unavailable" sentinel go after all comparable ones while
/// preserving their relative order. Distance is the only sort key.
pub fn rank(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| match (a.distance_km, b.distance_km) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Slice out one page: `page * page_size` offset, no cursor state
///
/// Out-of-range pages yield an empty vector; a zero page size yields
/// nothing. Page 0 with page size N doubles as "truncate to top N".
pub fn paginate<T>(items: Vec<T>, page: &Page) -> Vec<T> {
    if page.page_size == 0 {
        return Vec::new();
    }

    items
        .into_iter()
        .skip(page.page.saturating_mul(page.page_size))
        .take(page.page_size)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn candidate(id: &str, distance_km: Option<f64>) -> Candidate {
        Candidate {
            user_id: id.to_string(),
            name: format!("User {}", id),
            age: Some(30),
            gender: None,
            role: Role::Buddy,
            interests: vec![],
            availability: vec![],
            fitness_level: None,
            rating: 0.0,
            distance_km,
        }
    }

    fn ids(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.user_id.as_str()).collect()
    }

    #[test]
    fn test_rank_ascending_distance() {
        let mut list = vec![
            candidate("far", Some(30.0)),
            candidate("near", Some(1.0)),
            candidate("mid", Some(10.0)),
        ];
        rank(&mut list);
        assert_eq!(ids(&list), vec!["near", "mid", "far"]);
    }

    #[test]
    fn test_rank_is_stable_on_ties() {
        let mut list = vec![
            candidate("a", Some(5.0)),
            candidate("b", Some(5.0)),
            candidate("c", Some(5.0)),
        ];
        rank(&mut list);
        assert_eq!(ids(&list), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unavailable_distance_sorts_last() {
        let mut list = vec![
            candidate("u1", None),
            candidate("u2", Some(2.0)),
            candidate("u3", None),
            candidate("u4", Some(1.0)),
        ];
        rank(&mut list);
        // Comparable first, sentinels after in input order
        assert_eq!(ids(&list), vec!["u4", "u2", "u1", "u3"]);
    }

    #[test]
    fn test_paginate_slices_by_page() {
        let items: Vec<i32> = (0..10).collect();

        let first = paginate(items.clone(), &Page { page: 0, page_size: 4 });
        assert_eq!(first, vec![0, 1, 2, 3]);

        let second = paginate(items.clone(), &Page { page: 1, page_size: 4 });
        assert_eq!(second, vec![4, 5, 6, 7]);

        let third = paginate(items.clone(), &Page { page: 2, page_size: 4 });
        assert_eq!(third, vec![8, 9]);

        let beyond = paginate(items, &Page { page: 3, page_size: 4 });
        assert!(beyond.is_empty());
    }

    #[test]
    fn test_pagination_completeness() {
        let items: Vec<i32> = (0..23).collect();
        let page_size = 5;

        let mut reassembled = Vec::new();
        let mut page = 0;
        loop {
            let chunk = paginate(items.clone(), &Page { page, page_size });
            if chunk.is_empty() {
                break;
            }
            reassembled.extend(chunk);
            page += 1;
        }

        assert_eq!(reassembled, items);
    }

    #[test]
    fn test_zero_page_size_yields_nothing() {
        let items: Vec<i32> = (0..5).collect();
        assert!(paginate(items, &Page { page: 0, page_size: 0 }).is_empty());
    }
}
