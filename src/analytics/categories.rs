//! Rule-based keyword themes

use crate::models::KeywordCount;
use serde::{Deserialize, Serialize};

/// Keyword theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    Security,
    Technical,
    SupplyChain,
    Action,
}

impl KeywordCategory {
    /// All categories, in matching priority order
    pub fn all() -> [Self; 4] {
        [
            Self::Security,
            Self::Technical,
            Self::SupplyChain,
            Self::Action,
        ]
    }

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Security => "Security",
            Self::Technical => "Technical",
            Self::SupplyChain => "Supply Chain",
            Self::Action => "Action",
        }
    }

    /// Words belonging to this category
    pub fn lexicon(&self) -> &'static [&'static str] {
        match self {
            Self::Security => &[
                "security",
                "malicious",
                "attack",
                "vulnerability",
                "threat",
                "breach",
                "exploit",
                "malware",
                "worm",
            ],
            Self::Technical => &[
                "npm",
                "package",
                "node",
                "javascript",
                "code",
                "library",
                "dependency",
                "install",
                "version",
            ],
            Self::SupplyChain => &["supply", "chain", "dependencies", "upstream", "downstream"],
            Self::Action => &[
                "update", "fix", "patch", "remove", "check", "scan", "monitor", "protect",
            ],
        }
    }

    /// First category whose lexicon holds `word`
    pub fn of(word: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|category| category.lexicon().contains(&word))
    }
}

impl std::fmt::Display for KeywordCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ranked keywords sorted into themes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedKeywords {
    /// One entry per category, in [`KeywordCategory::all`] order, possibly empty
    pub categories: Vec<(KeywordCategory, Vec<KeywordCount>)>,
    pub uncategorized: Vec<KeywordCount>,
}

impl CategorizedKeywords {
    /// Keywords assigned to `category`
    pub fn get(&self, category: KeywordCategory) -> &[KeywordCount] {
        self.categories
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, words)| words.as_slice())
            .unwrap_or(&[])
    }

    /// Number of keywords that landed in some category
    pub fn categorized_len(&self) -> usize {
        self.categories.iter().map(|(_, words)| words.len()).sum()
    }

    /// Summed frequency per category
    pub fn totals(&self) -> Vec<(KeywordCategory, u64)> {
        self.categories
            .iter()
            .map(|(c, words)| (*c, words.iter().map(|k| k.count).sum()))
            .collect()
    }
}

/// Sort a keyword ranking into themes, keeping ranking order inside each
pub fn categorize_keywords(keywords: &[KeywordCount]) -> CategorizedKeywords {
    let mut categories: Vec<(KeywordCategory, Vec<KeywordCount>)> = KeywordCategory::all()
        .into_iter()
        .map(|c| (c, Vec::new()))
        .collect();
    let mut uncategorized = Vec::new();

    for keyword in keywords {
        match KeywordCategory::of(&keyword.word) {
            Some(category) => {
                if let Some((_, words)) = categories.iter_mut().find(|(c, _)| *c == category) {
                    words.push(keyword.clone());
                }
            }
            None => uncategorized.push(keyword.clone()),
        }
    }

    CategorizedKeywords {
        categories,
        uncategorized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize() {
        let keywords = vec![
            KeywordCount::new("npm", 30),
            KeywordCount::new("attack", 20),
            KeywordCount::new("shai", 15),
            KeywordCount::new("package", 12),
            KeywordCount::new("supply", 10),
            KeywordCount::new("patch", 4),
        ];
        let categorized = categorize_keywords(&keywords);

        assert_eq!(
            categorized.get(KeywordCategory::Technical),
            &[KeywordCount::new("npm", 30), KeywordCount::new("package", 12)]
        );
        assert_eq!(categorized.get(KeywordCategory::Security).len(), 1);
        assert_eq!(categorized.get(KeywordCategory::SupplyChain).len(), 1);
        assert_eq!(categorized.get(KeywordCategory::Action).len(), 1);
        assert_eq!(categorized.uncategorized, vec![KeywordCount::new("shai", 15)]);
        assert_eq!(categorized.categorized_len(), 5);
        assert_eq!(categorized.totals()[1], (KeywordCategory::Technical, 42));
    }

    #[test]
    fn test_empty_categories_present() {
        let categorized = categorize_keywords(&[]);
        assert_eq!(categorized.categories.len(), 4);
        assert_eq!(categorized.categorized_len(), 0);
    }

    #[test]
    fn test_of() {
        assert_eq!(KeywordCategory::of("worm"), Some(KeywordCategory::Security));
        assert_eq!(KeywordCategory::of("chain"), Some(KeywordCategory::SupplyChain));
        assert_eq!(KeywordCategory::of("github"), None);
    }
}
