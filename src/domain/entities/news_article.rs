use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// The subset of an article returned to API callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub title: String,
    pub link: String,
    pub summary: String,
}

impl NewsArticle {
    pub fn new(title: impl Into<String>, link: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            summary: summary.into(),
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Text representation for embedding.
    ///
    /// Title and summary are joined when both are present, otherwise
    /// whichever one is non-empty. With neither, the body content is used,
    /// and failing that the empty string: the article stays in the index
    /// and simply ranks low.
    pub fn searchable_text(&self) -> String {
        let title = self.title.trim();
        let summary = self.summary.trim();
        match (title.is_empty(), summary.is_empty()) {
            (false, false) => format!("{title} {summary}"),
            (false, true) => title.to_string(),
            (true, false) => summary.to_string(),
            (true, true) => self
                .content
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
        }
    }

    pub fn to_summary(&self) -> ArticleSummary {
        ArticleSummary {
            title: self.title.clone(),
            link: self.link.clone(),
            summary: self.summary.clone(),
        }
    }
}
