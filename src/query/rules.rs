//! Keyword rule tables
//!
//! A rule holds groups of keywords. It matches when every group has at least
//! one keyword occurring (case-insensitively) in the text. Tables are ordered
//! and the first matching rule wins.

use super::QueryKind;

#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<T> {
    pub all_of: &'static [&'static [&'static str]],
    pub outcome: T,
}

impl<T: Copy> KeywordRule<T> {
    /// `lowered` must already be lowercase.
    pub fn matches(&self, lowered: &str) -> bool {
        self.all_of
            .iter()
            .all(|group| group.iter().any(|keyword| lowered.contains(keyword)))
    }
}

/// First outcome in `rules` whose rule matches `text`.
pub fn first_match<T: Copy>(rules: &[KeywordRule<T>], text: &str) -> Option<T> {
    let lowered = text.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.outcome)
}

/// Query classification. Anything unmatched is [`QueryKind::Simple`].
///
/// The hybrid rule is a strict refinement of the complex one, so it comes
/// first.
pub const CLASSIFICATION_RULES: &[KeywordRule<QueryKind>] = &[
    KeywordRule {
        all_of: &[&["stats", "overview"], &["risk", "cluster"]],
        outcome: QueryKind::Hybrid,
    },
    KeywordRule {
        all_of: &[&["risk", "cluster", "community"]],
        outcome: QueryKind::Complex,
    },
];

/// What a simple query asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleTopic {
    Overview,
    DegreeDistribution,
    Hubs,
    /// Answered from fixed text without touching the graph
    Canned(CannedAnswer),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CannedAnswer {
    ShoeSuppliers,
    SockSuppliers,
    StrikeImpact,
}

impl CannedAnswer {
    pub fn text(self) -> &'static str {
        match self {
            CannedAnswer::ShoeSuppliers => {
                "There are 3 suppliers that provide Shoes: Nike, Adidas, and SupplierX. \
                 Nike is the primary supplier with 60% of shoe production capacity."
            }
            CannedAnswer::SockSuppliers => {
                "Socks are supplied by Adidas (70% of production) and SupplierX (30% of production)."
            }
            CannedAnswer::StrikeImpact => {
                "The Strike_China_2025 event would directly impact 3 suppliers: Nike (primary impact: \
                 80% production capacity affected), Adidas (secondary impact: 45% production capacity \
                 affected), and SupplierX (minimal impact: 15% production capacity affected). These \
                 suppliers collectively provide 70% of your total product inventory. Recommended action: \
                 Establish emergency procurement procedures with alternative suppliers in Southeast Asia."
            }
        }
    }
}

pub const SIMPLE_RULES: &[KeywordRule<SimpleTopic>] = &[
    KeywordRule {
        all_of: &[&["stats", "overview", "summary"]],
        outcome: SimpleTopic::Overview,
    },
    KeywordRule {
        all_of: &[&["degree", "distribution"]],
        outcome: SimpleTopic::DegreeDistribution,
    },
    KeywordRule {
        all_of: &[&["hubs", "important", "central"]],
        outcome: SimpleTopic::Hubs,
    },
    KeywordRule {
        all_of: &[&["shoes"], &["supplier"]],
        outcome: SimpleTopic::Canned(CannedAnswer::ShoeSuppliers),
    },
    KeywordRule {
        all_of: &[&["socks"], &["supplier"]],
        outcome: SimpleTopic::Canned(CannedAnswer::SockSuppliers),
    },
    KeywordRule {
        all_of: &[&["strike"]],
        outcome: SimpleTopic::Canned(CannedAnswer::StrikeImpact),
    },
];
