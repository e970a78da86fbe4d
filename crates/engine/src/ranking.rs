//! Ordering and truncation of matched crops.

use soil_model::Recommendation;

/// Upper bound on the number of crops returned for one profile
pub const MAX_RECOMMENDATIONS: usize = 6;

/// Sort by tier (excellent, good, fair) and keep the first `limit`.
///
/// The sort is stable: recommendations sharing a tier keep the order they
/// arrived in, which for the engine is catalog declaration order.
pub fn rank_and_truncate(mut recommendations: Vec<Recommendation>, limit: usize) -> Vec<Recommendation> {
    recommendations.sort_by_key(|rec| rec.suitability.rank());
    recommendations.truncate(limit);
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use soil_model::Suitability;

    fn rec(name: &str, suitability: Suitability) -> Recommendation {
        Recommendation {
            name: name.to_string(),
            description: String::new(),
            suitability,
            benefits: vec![],
        }
    }

    fn names(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_fair_sorts_last() {
        let ranked = rank_and_truncate(
            vec![
                rec("a", Suitability::Fair),
                rec("b", Suitability::Good),
                rec("c", Suitability::Excellent),
            ],
            MAX_RECOMMENDATIONS,
        );
        assert_eq!(names(&ranked), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank_and_truncate(
            vec![
                rec("g1", Suitability::Good),
                rec("e1", Suitability::Excellent),
                rec("f1", Suitability::Fair),
                rec("g2", Suitability::Good),
                rec("e2", Suitability::Excellent),
                rec("g3", Suitability::Good),
            ],
            MAX_RECOMMENDATIONS,
        );
        assert_eq!(names(&ranked), vec!["e1", "e2", "g1", "g2", "g3", "f1"]);
    }

    #[test]
    fn test_truncates_after_sorting() {
        let input: Vec<Recommendation> = (0..8)
            .map(|i| rec(&format!("g{i}"), Suitability::Good))
            .chain(std::iter::once(rec("late", Suitability::Excellent)))
            .collect();

        let ranked = rank_and_truncate(input, MAX_RECOMMENDATIONS);
        assert_eq!(ranked.len(), 6);
        assert_eq!(ranked[0].name, "late");
        assert_eq!(ranked[5].name, "g4");
    }

    #[test]
    fn test_short_and_empty_input() {
        assert!(rank_and_truncate(vec![], MAX_RECOMMENDATIONS).is_empty());

        let ranked = rank_and_truncate(vec![rec("only", Suitability::Good)], MAX_RECOMMENDATIONS);
        assert_eq!(names(&ranked), vec!["only"]);
    }

    #[test]
    fn test_respects_smaller_limits() {
        let input = || {
            vec![
                rec("g1", Suitability::Good),
                rec("e1", Suitability::Excellent),
                rec("g2", Suitability::Good),
                rec("e2", Suitability::Excellent),
            ]
        };

        assert!(rank_and_truncate(input(), 0).is_empty());
        assert_eq!(names(&rank_and_truncate(input(), 2)), vec!["e1", "e2"]);
        assert_eq!(names(&rank_and_truncate(input(), 3)), vec!["e1", "e2", "g1"]);
    }
}
