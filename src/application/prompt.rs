use crate::domain::entities::session::ChatTurn;
use crate::domain::values::portfolio::PortfolioAnalysis;
use crate::domain::values::search::RankedArticle;
use std::fmt::Write;

const PREAMBLE: &str = "You are an expert financial analyst. Given the portfolio analysis, \
the news context and the conversation so far, provide a detailed answer to the question.";

/// Assemble the single prompt sent to the language model.
pub fn build_prompt(
    analysis: &PortfolioAnalysis,
    news: &[RankedArticle],
    history: &[ChatTurn],
    question: &str,
) -> String {
    let analysis_json = serde_json::to_string_pretty(analysis).unwrap_or_else(|_| "{}".to_string());

    let mut prompt = String::new();
    let _ = writeln!(prompt, "{PREAMBLE}\n");
    let _ = writeln!(prompt, "Portfolio analysis:\n{analysis_json}\n");

    prompt.push_str("Relevant news:\n");
    if news.is_empty() {
        prompt.push_str("(no closely related news found)\n");
    }
    for (i, ranked) in news.iter().enumerate() {
        let a = &ranked.article;
        let _ = writeln!(prompt, "{}. {} ({})\n   {}", i + 1, a.title, a.link, a.summary);
    }

    if !history.is_empty() {
        prompt.push_str("\nConversation so far:\n");
        for turn in history {
            let _ = writeln!(prompt, "{}: {}", turn.role, turn.content);
        }
    }

    let _ = write!(
        prompt,
        "\nQuestion: {question}\nAnswer based on the portfolio analysis and the news context above."
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::news_article::NewsArticle;

    #[test]
    fn test_prompt_contains_all_parts() {
        let analysis = PortfolioAnalysis::from_holdings(&[]);
        let news = vec![RankedArticle {
            position: 0,
            distance: 0.3,
            article: NewsArticle::new("Fed holds rates", "https://n/1", "Rates unchanged"),
        }];
        let history = vec![ChatTurn::user("Earlier?"), ChatTurn::assistant("Yes.")];
        let p = build_prompt(&analysis, &news, &history, "Should I buy bonds?");

        assert!(p.starts_with("You are an expert financial analyst"));
        assert!(p.contains("\"Total_Invested\""));
        assert!(p.contains("1. Fed holds rates (https://n/1)"));
        assert!(p.contains("user: Earlier?"));
        assert!(p.contains("assistant: Yes."));
        assert!(p.contains("Question: Should I buy bonds?"));
    }

    #[test]
    fn test_prompt_without_news_or_history() {
        let p = build_prompt(&PortfolioAnalysis::from_holdings(&[]), &[], &[], "Q");
        assert!(p.contains("(no closely related news found)"));
        assert!(!p.contains("Conversation so far"));
    }
}
