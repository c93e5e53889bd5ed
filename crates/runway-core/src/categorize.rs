//! Category rule table for labelling transactions
//!
//! Rules map a merchant/description pattern to a category and are evaluated
//! in priority order (highest first, ties keep table order). The first match
//! wins. A built-in table covers common merchants; a config file may replace it.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// Category assigned when no rule matches
pub const FALLBACK_CATEGORY: &str = "Other";

/// Pattern matching type for category rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    /// Case-insensitive substring match (supports | for OR)
    Contains,
    /// Regular expression match (case-insensitive)
    Regex,
    /// Exact string match (case-insensitive)
    Exact,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::Regex => "regex",
            Self::Exact => "exact",
        }
    }
}

impl std::str::FromStr for PatternType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "contains" => Ok(Self::Contains),
            "regex" => Ok(Self::Regex),
            "exact" => Ok(Self::Exact),
            _ => Err(format!("Unknown pattern type: {}", s)),
        }
    }
}

/// A single pattern → category rule as written in config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub pattern: String,
    #[serde(default = "default_pattern_type")]
    pub pattern_type: PatternType,
    pub category: String,
    #[serde(default)]
    pub priority: i32,
}

fn default_pattern_type() -> PatternType {
    PatternType::Contains
}

impl CategoryRule {
    pub fn new(
        pattern: impl Into<String>,
        pattern_type: PatternType,
        category: impl Into<String>,
        priority: i32,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            pattern_type,
            category: category.into(),
            priority,
        }
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    /// Uppercased alternatives
    Contains(Vec<String>),
    Regex(Regex),
    /// Uppercased pattern
    Exact(String),
}

impl Matcher {
    fn compile(rule: &CategoryRule) -> Result<Self> {
        Ok(match rule.pattern_type {
            PatternType::Contains => Matcher::Contains(
                rule.pattern
                    .split('|')
                    .map(|p| p.trim().to_uppercase())
                    .filter(|p| !p.is_empty())
                    .collect(),
            ),
            PatternType::Regex => Matcher::Regex(
                RegexBuilder::new(&rule.pattern)
                    .case_insensitive(true)
                    .build()?,
            ),
            PatternType::Exact => Matcher::Exact(rule.pattern.trim().to_uppercase()),
        })
    }

    fn is_match(&self, text: &str) -> bool {
        match self {
            Matcher::Contains(needles) => {
                let upper = text.to_uppercase();
                needles.iter().any(|n| upper.contains(n.as_str()))
            }
            Matcher::Regex(re) => re.is_match(text),
            Matcher::Exact(pattern) => text.trim().to_uppercase() == *pattern,
        }
    }
}

/// Compiled, priority-ordered rule table
#[derive(Debug, Clone)]
pub struct CategoryRules {
    rules: Vec<(CategoryRule, Matcher)>,
}

impl CategoryRules {
    /// Compile rules, failing on the first invalid regex
    pub fn new(rules: Vec<CategoryRule>) -> Result<Self> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            let matcher = Matcher::compile(&rule)?;
            compiled.push((rule, matcher));
        }
        Ok(Self::ordered(compiled))
    }

    /// Compile rules, dropping (and logging) any that fail to compile
    pub fn lenient(rules: Vec<CategoryRule>) -> Self {
        let compiled = rules
            .into_iter()
            .filter_map(|rule| match Matcher::compile(&rule) {
                Ok(matcher) => Some((rule, matcher)),
                Err(e) => {
                    warn!(pattern = %rule.pattern, error = %e, "Skipping invalid category rule");
                    None
                }
            })
            .collect();
        Self::ordered(compiled)
    }

    fn ordered(mut rules: Vec<(CategoryRule, Matcher)>) -> Self {
        // Stable sort keeps table order for equal priorities
        rules.sort_by(|a, b| b.0.priority.cmp(&a.0.priority));
        Self { rules }
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Category of the first matching rule, if any
    pub fn categorize(&self, text: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|(_, matcher)| matcher.is_match(text))
            .map(|(rule, _)| rule.category.as_str())
    }

    /// Category of the first matching rule, or the fallback category
    pub fn categorize_or_fallback(&self, text: &str) -> String {
        self.categorize(text)
            .unwrap_or(FALLBACK_CATEGORY)
            .to_string()
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> impl Iterator<Item = &CategoryRule> {
        self.rules.iter().map(|(rule, _)| rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self::lenient(builtin_rules())
    }
}

/// Built-in merchant table
pub fn builtin_rules() -> Vec<CategoryRule> {
    use PatternType::{Contains, Regex};

    vec![
        // Streaming and software are checked before generic retail
        CategoryRule::new(
            "NETFLIX|SPOTIFY|DISNEY+|HULU|YOUTUBE PREMIUM|APPLE.COM/BILL|PRIME VIDEO",
            Contains,
            "Subscriptions",
            30,
        ),
        CategoryRule::new(r"\b(gym|fitness|peloton)\b", Regex, "Fitness", 20),
        CategoryRule::new(
            "UBER EATS|DELIVEROO|DOORDASH|JUST EAT|GRUBHUB",
            Contains,
            "Takeaway",
            20,
        ),
        CategoryRule::new(
            "TESCO|SAINSBURY|ALDI|LIDL|WAITROSE|WHOLE FOODS|KROGER|SAFEWAY|GROCER",
            Contains,
            "Groceries",
            10,
        ),
        CategoryRule::new(
            "STARBUCKS|COSTA|PRET|CAFE|COFFEE",
            Contains,
            "Coffee",
            10,
        ),
        CategoryRule::new(
            "RESTAURANT|PIZZA|BURGER|SUSHI|MCDONALD|NANDO",
            Contains,
            "Dining",
            5,
        ),
        CategoryRule::new(
            "UBER|LYFT|TFL|TRAINLINE|SHELL|BP |CHEVRON|PARKING",
            Contains,
            "Transport",
            5,
        ),
        CategoryRule::new("AMAZON|EBAY|ETSY|ARGOS", Contains, "Shopping", 1),
        CategoryRule::new(r"^(rent|mortgage)\b", Regex, "Housing", 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pipe_alternatives() {
        let rules = CategoryRules::new(vec![CategoryRule::new(
            "SHELL|CHEVRON",
            PatternType::Contains,
            "Fuel",
            0,
        )])
        .unwrap();

        assert_eq!(rules.categorize("chevron 0042"), Some("Fuel"));
        assert_eq!(rules.categorize("SHELL OIL"), Some("Fuel"));
        assert_eq!(rules.categorize("EXXON"), None);
    }

    #[test]
    fn test_priority_beats_table_order() {
        let rules = CategoryRules::new(vec![
            CategoryRule::new("UBER", PatternType::Contains, "Transport", 1),
            CategoryRule::new("UBER EATS", PatternType::Contains, "Takeaway", 5),
        ])
        .unwrap();

        assert_eq!(rules.categorize("Uber Eats London"), Some("Takeaway"));
        assert_eq!(rules.categorize("Uber Trip"), Some("Transport"));
    }

    #[test]
    fn test_equal_priority_keeps_table_order() {
        let rules = CategoryRules::new(vec![
            CategoryRule::new("MART", PatternType::Contains, "First", 0),
            CategoryRule::new("MART", PatternType::Contains, "Second", 0),
        ])
        .unwrap();

        assert_eq!(rules.categorize("WALMART"), Some("First"));
    }

    #[test]
    fn test_exact_and_regex() {
        let rules = CategoryRules::new(vec![
            CategoryRule::new("rent", PatternType::Exact, "Housing", 0),
            CategoryRule::new(r"^atm\s+\d+", PatternType::Regex, "Cash", 0),
        ])
        .unwrap();

        assert_eq!(rules.categorize(" RENT "), Some("Housing"));
        assert_eq!(rules.categorize("rent share"), None);
        assert_eq!(rules.categorize("ATM 1234 HIGH ST"), Some("Cash"));
    }

    #[test]
    fn test_invalid_regex() {
        let bad = vec![CategoryRule::new("(", PatternType::Regex, "Broken", 0)];
        assert!(CategoryRules::new(bad.clone()).is_err());
        assert!(CategoryRules::lenient(bad).is_empty());
    }

    #[test]
    fn test_builtin_table() {
        let rules = CategoryRules::default();
        assert_eq!(rules.len(), builtin_rules().len());
        assert_eq!(rules.categorize("NETFLIX.COM"), Some("Subscriptions"));
        assert_eq!(rules.categorize("Tesco Metro"), Some("Groceries"));
        assert_eq!(rules.categorize("Uber Eats"), Some("Takeaway"));
        assert_eq!(rules.categorize_or_fallback("Mystery Vendor"), FALLBACK_CATEGORY);
    }
}
