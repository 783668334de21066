//! Generate human-readable explanations for recommendations.

use crate::source::course_url;
use crate::types::{RequiredLevel, ScoredItem};

/// Placeholder shown for items without a description.
const NO_DESCRIPTION: &str = "_No description_";

/// Render one recommendation as a short course card.
pub fn explain(scored: &ScoredItem) -> Vec<String> {
    let mut lines = vec![format!("{} (score {:.2})", scored.item.name, scored.score)];

    let description = scored
        .item
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(NO_DESCRIPTION);
    lines.push(description.to_string());

    lines.push(format!("Skill level: {}", scored.target_level));
    lines.push(format!("Experience: {}", scored.experience_level));

    if !scored.matched.is_empty() {
        let matched: Vec<String> = scored
            .matched
            .iter()
            .map(|m| format!("{} ({:.2}, {})", m.label, m.score, m.level))
            .collect();
        lines.push(format!("Matches: {}", matched.join(", ")));
    }

    if let Some(url) = course_url(&scored.item) {
        lines.push(format!("Link: {url}"));
    }

    lines
}

/// One-line summary of a recommendation list.
pub fn summarize(results: &[ScoredItem]) -> String {
    match results {
        [] => "No relevant courses found".to_string(),
        [only] => format!("Found 1 recommendation (top score {:.2})", only.score),
        [best, ..] => {
            let mut essential: Vec<&str> = results
                .iter()
                .flat_map(|r| r.matched.iter())
                .filter(|m| m.level == RequiredLevel::Essential)
                .map(|m| m.label.as_str())
                .collect();
            essential.sort_unstable();
            essential.dedup();

            let mut summary = format!(
                "Found {} recommendations (top score {:.2})",
                results.len(),
                best.score
            );
            if !essential.is_empty() {
                let covered = essential.join(", ");
                summary.push_str(&format!(", covering essential: {covered}"));
            }
            summary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CandidateItem, MatchScore, MatchedCapability, MissingCapability};

    fn scored(item: CandidateItem, score: f64, matched: Vec<MatchedCapability>) -> ScoredItem {
        let driver = MissingCapability::new("data visualization", RequiredLevel::Essential);
        ScoredItem::new(
            item,
            MatchScore {
                total_score: score,
                matched,
            },
            &driver,
        )
    }

    fn matched(label: &str, score: f64, level: RequiredLevel) -> MatchedCapability {
        MatchedCapability {
            label: label.to_string(),
            score,
            level,
        }
    }

    #[test]
    fn test_explain_full_card() {
        let item = CandidateItem::new("Data Visualization with Python", Some("Intro to charts"))
            .with_field("slug", "python-for-data-visualization");
        let card = scored(
            item,
            1.159,
            vec![matched(
                "data visualization",
                0.5795,
                RequiredLevel::Essential,
            )],
        );

        assert_eq!(
            explain(&card),
            vec![
                "Data Visualization with Python (score 1.16)",
                "Intro to charts",
                "Skill level: essential",
                "Experience: Beginner",
                "Matches: data visualization (0.58, essential)",
                "Link: https://www.coursera.org/learn/python-for-data-visualization",
            ]
        );
    }

    #[test]
    fn test_explain_without_description_or_slug() {
        let card = scored(CandidateItem::new("Charts 101", None), 0.4, Vec::new());
        let lines = explain(&card);
        assert_eq!(lines[1], "_No description_");
        assert!(lines.iter().all(|l| !l.starts_with("Link:")));
        assert!(lines.iter().all(|l| !l.starts_with("Matches:")));
    }

    #[test]
    fn test_explain_blank_description_is_placeholder() {
        let card = scored(
            CandidateItem::new("Charts 101", Some("   ")),
            0.4,
            Vec::new(),
        );
        assert_eq!(explain(&card)[1], "_No description_");
    }

    #[test]
    fn test_summarize() {
        assert_eq!(summarize(&[]), "No relevant courses found");

        let one = scored(CandidateItem::new("A", None), 0.9, Vec::new());
        assert_eq!(
            summarize(std::slice::from_ref(&one)),
            "Found 1 recommendation (top score 0.90)"
        );

        let two = vec![
            scored(
                CandidateItem::new("A", None),
                1.25,
                vec![
                    matched("statistics", 0.62, RequiredLevel::Essential),
                    matched("data visualization", 0.4, RequiredLevel::Optional),
                ],
            ),
            scored(
                CandidateItem::new("B", None),
                0.87,
                vec![matched("python", 0.43, RequiredLevel::Essential)],
            ),
        ];
        assert_eq!(
            summarize(&two),
            "Found 2 recommendations (top score 1.25), covering essential: python, statistics"
        );
    }
}
