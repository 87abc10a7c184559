//! Catalog records as supplied by the catalog collaborator.

use serde::{Deserialize, Serialize};

/// A navigable entry of the service directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub page_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub sub_sections: Vec<SubSection>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub reviews: u32,
}

/// An anchor inside a service page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubSection {
    pub name: String,
    pub section_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Service {
    /// Minimal constructor, mostly useful for collaborators that only know
    /// the routing-relevant fields.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        page_url: impl Into<String>,
        keywords: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            page_url: page_url.into(),
            description: String::new(),
            icon: None,
            color: None,
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            sub_sections: Vec::new(),
            featured: false,
            rating: 0.0,
            reviews: 0,
        }
    }

    /// Trims and lowercases keywords, drops empty ones, and clamps the rating
    /// into `0..=5`.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.page_url = self.page_url.trim().to_string();
        self.keywords = normalize_keywords(self.keywords);
        for section in &mut self.sub_sections {
            section.keywords = normalize_keywords(std::mem::take(&mut section.keywords));
        }
        self.rating = self.rating.clamp(0.0, 5.0);
        self
    }
}

fn normalize_keywords(keywords: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        let keyword = keyword.trim().to_lowercase();
        if !keyword.is_empty() && !out.contains(&keyword) {
            out.push(keyword);
        }
    }
    out
}

/// Outcome of scoring the catalog against a query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchResult {
    pub service: Option<Service>,
    pub confidence: u32,
}

impl MatchResult {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            service: None,
            confidence: 0,
        }
    }

    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.service.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_lowercases_and_dedups_keywords() {
        let service = Service::new("1", " Plumbing Services ", "/plumbing", &["Pipe", " pipe", "", "LEAK"])
            .normalized();
        assert_eq!(service.name, "Plumbing Services");
        assert_eq!(service.keywords, vec!["pipe", "leak"]);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn deserializes_mongo_style_ids() {
        let json = r#"{"_id":"7","name":"HVAC Services","pageUrl":"/hvac","keywords":["ac"]}"#;
        let service: Service = serde_json::from_str(json).expect("service should deserialize");
        assert_eq!(service.id, "7");
        assert_eq!(service.page_url, "/hvac");
        assert!(service.sub_sections.is_empty());
    }
}
