//! Template-based insight generator.

use async_trait::async_trait;
use candor_core::error::Result;
use candor_core::session::{InsightGenerator, Insights};
use std::collections::HashMap;

/// How many characters of an answer make it into a key point before the
/// excerpt is cut.
const KEY_POINT_EXCERPT_LEN: usize = 120;

/// Answers at or above this length (in characters) count as detailed for
/// the strengths heuristic.
const DETAILED_ANSWER_LEN: usize = 80;

/// An [`InsightGenerator`] that derives insights deterministically from the
/// accumulated answers.
///
/// Stands in for the external text-generation service: key points are
/// excerpts of each answer in question order, and strengths/recommendations
/// come from simple coverage and depth heuristics. Deterministic output
/// keeps completion reproducible in development and tests.
#[derive(Debug, Clone, Default)]
pub struct TemplateInsightGenerator;

impl TemplateInsightGenerator {
    pub fn new() -> Self {
        Self
    }

    fn excerpt(text: &str) -> String {
        let trimmed = text.trim();
        if trimmed.chars().count() <= KEY_POINT_EXCERPT_LEN {
            return trimmed.to_string();
        }
        let cut: String = trimmed.chars().take(KEY_POINT_EXCERPT_LEN).collect();
        format!("{}...", cut.trim_end())
    }
}

#[async_trait]
impl InsightGenerator for TemplateInsightGenerator {
    async fn generate(&self, answers: &HashMap<usize, String>) -> Result<Insights> {
        let mut indices: Vec<usize> = answers.keys().copied().collect();
        indices.sort_unstable();

        let key_points: Vec<String> = indices
            .iter()
            .filter_map(|index| answers.get(index))
            .filter(|text| !text.trim().is_empty())
            .map(|text| Self::excerpt(text))
            .collect();

        let answered = key_points.len();
        let detailed = answers
            .values()
            .filter(|text| text.trim().chars().count() >= DETAILED_ANSWER_LEN)
            .count();

        let mut strengths = Vec::new();
        if answered > 0 {
            strengths.push(format!("Responded to {} question(s)", answered));
        }
        if detailed > 0 {
            strengths.push(format!("Gave detailed answers to {} question(s)", detailed));
        }

        let mut recommendations = Vec::new();
        if answered == 0 {
            recommendations.push("No answers were recorded; consider a follow-up session".to_string());
        } else if detailed < answered {
            recommendations
                .push("Probe the shorter answers in more depth during review".to_string());
        } else {
            recommendations.push("Proceed to reviewer evaluation".to_string());
        }

        Ok(Insights {
            key_points,
            strengths,
            recommendations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(items: &[(usize, &str)]) -> HashMap<usize, String> {
        items
            .iter()
            .map(|&(index, text)| (index, text.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn key_points_follow_question_order() {
        let generator = TemplateInsightGenerator::new();
        let insights = generator
            .generate(&answers(&[(2, "third"), (0, "first"), (1, "second")]))
            .await
            .unwrap();

        assert_eq!(insights.key_points, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn long_answers_are_excerpted() {
        let generator = TemplateInsightGenerator::new();
        let long_answer = "x".repeat(300);
        let insights = generator.generate(&answers(&[(0, &long_answer)])).await.unwrap();

        assert!(insights.key_points[0].ends_with("..."));
        assert!(insights.key_points[0].chars().count() <= KEY_POINT_EXCERPT_LEN + 3);
    }

    #[tokio::test]
    async fn empty_answer_set_recommends_follow_up() {
        let generator = TemplateInsightGenerator::new();
        let insights = generator.generate(&HashMap::new()).await.unwrap();

        assert!(insights.key_points.is_empty());
        assert!(insights.strengths.is_empty());
        assert_eq!(insights.recommendations.len(), 1);
        assert!(insights.recommendations[0].contains("follow-up"));
    }

    #[tokio::test]
    async fn blank_answers_are_skipped() {
        let generator = TemplateInsightGenerator::new();
        let insights = generator
            .generate(&answers(&[(0, "   "), (1, "real answer")]))
            .await
            .unwrap();

        assert_eq!(insights.key_points, vec!["real answer"]);
    }

    #[tokio::test]
    async fn output_is_deterministic() {
        let generator = TemplateInsightGenerator::new();
        let input = answers(&[(0, "alpha"), (1, "beta")]);

        let first = generator.generate(&input).await.unwrap();
        let second = generator.generate(&input).await.unwrap();
        assert_eq!(first, second);
    }
}
