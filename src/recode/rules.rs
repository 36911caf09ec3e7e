// Closed-vocabulary rule tables
//
// Every free-text recoding is an ordered list of (pattern, value) rules
// evaluated top to bottom. The first matching rule wins; exhaustion yields
// None. Tables are plain statics so the whole vocabulary can be audited and
// tested without running the pipeline.

use super::{IncomeLevel, PricePerception};

/// Substring predicate over a raw survey answer
#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    /// Answer contains the phrase (case-sensitive)
    Contains(&'static str),
    /// Every sub-pattern matches
    All(&'static [Pattern]),
    /// At least one sub-pattern matches
    Any(&'static [Pattern]),
}

impl Pattern {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Pattern::Contains(phrase) => text.contains(phrase),
            Pattern::All(patterns) => patterns.iter().all(|p| p.matches(text)),
            Pattern::Any(patterns) => patterns.iter().any(|p| p.matches(text)),
        }
    }
}

/// A single vocabulary entry
#[derive(Debug, Clone, Copy)]
pub struct Rule<T: 'static> {
    pub pattern: Pattern,
    pub value: T,
}

/// Ordered rule list for one survey field
#[derive(Debug)]
pub struct RuleTable<T: 'static> {
    /// Field name, used only for audit logging
    pub field: &'static str,
    pub rules: &'static [Rule<T>],
}

impl<T: Copy + std::fmt::Debug> RuleTable<T> {
    /// Resolve an answer against the table
    ///
    /// Missing answers and answers outside the vocabulary both resolve to
    /// `None`; the latter is logged at TRACE level for auditing.
    pub fn resolve(&self, text: Option<&str>) -> Option<T> {
        let text = text?;
        let value = self
            .rules
            .iter()
            .find(|rule| rule.pattern.matches(text))
            .map(|rule| rule.value);

        if value.is_none() {
            tracing::trace!(field = self.field, value = text, "Unrecognized answer");
        }
        value
    }
}

/// Thrift frequency buckets → representative trips per year
pub static FREQUENCY_BUCKETS: RuleTable<f64> = RuleTable {
    field: "thrift_frequency",
    rules: &[
        Rule {
            pattern: Pattern::Contains("did not thrift"),
            value: 0.0,
        },
        Rule {
            pattern: Pattern::Contains("1 to 3"),
            value: 2.0,
        },
        Rule {
            pattern: Pattern::Contains("4 to 8"),
            value: 6.0,
        },
        Rule {
            pattern: Pattern::Contains("9 to 12"),
            value: 10.5,
        },
        Rule {
            pattern: Pattern::Contains("13 to 20"),
            value: 16.5,
        },
        Rule {
            pattern: Pattern::Contains("21 or more"),
            value: 24.0,
        },
    ],
};

/// Social acceptability: the digit and its keyword phrase must both appear
pub static ACCEPTABILITY: RuleTable<i64> = RuleTable {
    field: "social_acceptability",
    rules: &[
        Rule {
            pattern: Pattern::All(&[
                Pattern::Contains("1"),
                Pattern::Contains("Very Unacceptable"),
            ]),
            value: 1,
        },
        Rule {
            pattern: Pattern::All(&[Pattern::Contains("2"), Pattern::Contains("Unacceptable")]),
            value: 2,
        },
        Rule {
            pattern: Pattern::All(&[Pattern::Contains("3"), Pattern::Contains("Neutral")]),
            value: 3,
        },
        Rule {
            pattern: Pattern::All(&[Pattern::Contains("4"), Pattern::Contains("Acceptable")]),
            value: 4,
        },
        Rule {
            pattern: Pattern::All(&[
                Pattern::Contains("5"),
                Pattern::Any(&[
                    Pattern::Contains("Very acceptable"),
                    Pattern::Contains("Very Acceptable"),
                ]),
            ]),
            value: 5,
        },
    ],
};

pub static PRICE_PERCEPTION: RuleTable<PricePerception> = RuleTable {
    field: "price_perception",
    rules: &[
        Rule {
            pattern: Pattern::Contains("Underpriced"),
            value: PricePerception::Underpriced,
        },
        Rule {
            pattern: Pattern::Contains("Priced correctly"),
            value: PricePerception::PricedCorrectly,
        },
        Rule {
            pattern: Pattern::Contains("Overpriced"),
            value: PricePerception::Overpriced,
        },
    ],
};

/// Income brackets. The 60,001 and 80,001 brackets both collapse into High.
pub static INCOME_BRACKETS: RuleTable<IncomeLevel> = RuleTable {
    field: "income",
    rules: &[
        Rule {
            pattern: Pattern::Contains("0-20,000"),
            value: IncomeLevel::Low,
        },
        Rule {
            pattern: Pattern::Contains("20,001-40,000"),
            value: IncomeLevel::MediumLow,
        },
        Rule {
            pattern: Pattern::Contains("40,001-60,000"),
            value: IncomeLevel::Medium,
        },
        Rule {
            pattern: Pattern::Any(&[Pattern::Contains("60,001"), Pattern::Contains("80,001")]),
            value: IncomeLevel::High,
        },
    ],
};

/// Multi-select motivation keywords, checked independently (not first-match)
pub const SUSTAINABILITY_KEYWORD: &str = "Sustainability";
pub const AFFORDABILITY_KEYWORD: &str = "Affordability";
pub const ENJOYMENT_KEYWORD: &str = "Enjoyment";

/// Likert answers look like "4 - Often"; the integer precedes this separator
pub const LIKERT_SEPARATOR: char = '-';
