//! Prompt construction for the narration upstream
//!
//! Pure template rendering; the HTTP call lives in the client.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Figures a narrative is rendered from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NarrativeContext {
    /// Quarter the figures refer to
    pub latest_period: String,
    /// Export total in millions of USD
    pub total_exports: f64,
    /// Export growth against the previous quarter, percent
    pub export_growth_rate: f64,
    /// Import total in millions of USD
    pub total_imports: f64,
    /// Import growth against the previous quarter, percent
    pub import_growth_rate: f64,
    /// Exports minus imports, millions of USD
    pub trade_balance: f64,
    /// Notable-movement sentences from the growth analysis
    pub insights: Vec<String>,
    /// One-line concentration reading, when computed
    pub concentration_summary: Option<String>,
}

/// Render the user prompt for a context.
///
/// Deterministic: the same context always renders the same string.
#[must_use]
pub fn build_prompt(context: &NarrativeContext) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "Write a short narrative of the latest quarterly trade statistics ({}).",
        context.latest_period
    );
    let _ = writeln!(
        prompt,
        "Exports: {:.2} million USD ({:+.1}% vs previous quarter).",
        context.total_exports, context.export_growth_rate
    );
    let _ = writeln!(
        prompt,
        "Imports: {:.2} million USD ({:+.1}% vs previous quarter).",
        context.total_imports, context.import_growth_rate
    );
    let _ = writeln!(
        prompt,
        "Trade balance: {:.2} million USD.",
        context.trade_balance
    );
    if let Some(concentration) = &context.concentration_summary {
        let _ = writeln!(prompt, "Market concentration: {concentration}.");
    }
    if !context.insights.is_empty() {
        let _ = writeln!(prompt, "Notable movements:");
        for insight in &context.insights {
            let _ = writeln!(prompt, "- {insight}");
        }
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_context() -> NarrativeContext {
        NarrativeContext {
            latest_period: "2025Q1".to_string(),
            total_exports: 458.44,
            export_growth_rate: -26.8,
            total_imports: 869.79,
            import_growth_rate: -20.2,
            trade_balance: -411.35,
            insights: vec!["Exports decreased by 26.8% from 2024Q4 to 2025Q1".to_string()],
            concentration_summary: Some("Moderately concentrated (HHI 0.1823)".to_string()),
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let context = sample_context();
        assert_eq!(build_prompt(&context), build_prompt(&context));
    }

    #[test]
    fn test_prompt_carries_all_figures() {
        let prompt = build_prompt(&sample_context());
        assert!(prompt.contains("2025Q1"));
        assert!(prompt.contains("458.44 million USD (-26.8% vs previous quarter)"));
        assert!(prompt.contains("869.79 million USD (-20.2% vs previous quarter)"));
        assert!(prompt.contains("Trade balance: -411.35 million USD."));
        assert!(prompt.contains("Moderately concentrated"));
        assert!(prompt.contains("- Exports decreased by 26.8%"));
    }

    #[test]
    fn test_prompt_omits_empty_sections() {
        let context = NarrativeContext::default();
        let prompt = build_prompt(&context);
        assert!(!prompt.contains("Notable movements"));
        assert!(!prompt.contains("Market concentration"));
    }
}
