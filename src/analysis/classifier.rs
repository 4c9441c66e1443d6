//! Rule-based heading classification.
//!
//! A block is first screened by a coarse pre-filter (too many words, or
//! sentence-terminated). Survivors run through an ordered decision list in
//! which the first matching rule decides the heading level. Blocks that
//! match no rule are paragraphs.

use serde::{Deserialize, Serialize};

use super::features::FeatureRecord;
use super::options::ClassifierConfig;
use crate::model::HeadingLevel;

/// Outcome of classifying one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// A heading at the given level
    Heading(HeadingLevel),
    /// Body text
    Paragraph,
}

impl Label {
    /// The heading level, if this is a heading.
    pub fn level(self) -> Option<HeadingLevel> {
        match self {
            Label::Heading(level) => Some(level),
            Label::Paragraph => None,
        }
    }
}

/// A feature record the classifier accepted as a heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Features of the block
    #[serde(flatten)]
    pub record: FeatureRecord,
    /// Assigned heading level
    pub level: HeadingLevel,
}

impl Classification {
    /// Pair a record with a level.
    pub fn new(record: FeatureRecord, level: HeadingLevel) -> Self {
        Self { record, level }
    }

    /// Block text.
    pub fn text(&self) -> &str {
        &self.record.text
    }

    /// Zero-based page index.
    pub fn page_num(&self) -> u32 {
        self.record.page_num
    }

    /// Parser block id.
    pub fn block_num(&self) -> i64 {
        self.record.block_num
    }
}

/// Signature of a single cascade rule.
pub type RuleFn = fn(&FeatureRecord, &ClassifierConfig) -> Option<HeadingLevel>;

/// A named entry in the decision list.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Short identifier used in logs
    pub name: &'static str,
    /// Returns a level when the rule matches
    pub apply: RuleFn,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// The decision list, strongest signal first.
pub const RULES: &[Rule] = &[
    Rule {
        name: "numbering",
        apply: numbered_heading,
    },
    Rule {
        name: "appendix",
        apply: appendix_heading,
    },
    Rule {
        name: "bold",
        apply: bold_heading,
    },
    Rule {
        name: "all-caps",
        apply: all_caps_heading,
    },
    Rule {
        name: "large-text",
        apply: large_text_heading,
    },
];

/// Outline numbers map directly to levels: `3` is H1, `3.1` H2, and so on.
fn numbered_heading(record: &FeatureRecord, _config: &ClassifierConfig) -> Option<HeadingLevel> {
    HeadingLevel::from_depth(record.numbering_depth)
}

fn appendix_heading(record: &FeatureRecord, config: &ClassifierConfig) -> Option<HeadingLevel> {
    record
        .text
        .starts_with(config.appendix_prefix.as_str())
        .then_some(HeadingLevel::H2)
}

/// Bold text is always a heading; its size only picks the level.
fn bold_heading(record: &FeatureRecord, config: &ClassifierConfig) -> Option<HeadingLevel> {
    if !record.is_bold {
        return None;
    }
    Some(if record.relative_size > config.bold_h1_ratio {
        HeadingLevel::H1
    } else if record.relative_size > config.bold_h2_ratio {
        HeadingLevel::H2
    } else {
        HeadingLevel::H3
    })
}

fn all_caps_heading(record: &FeatureRecord, config: &ClassifierConfig) -> Option<HeadingLevel> {
    (record.is_all_caps && record.word_count < config.caps_max_words).then_some(HeadingLevel::H1)
}

fn large_text_heading(record: &FeatureRecord, config: &ClassifierConfig) -> Option<HeadingLevel> {
    (record.relative_size > config.large_text_ratio).then_some(HeadingLevel::H1)
}

/// Classifies feature records into heading levels.
#[derive(Debug, Clone, Default)]
pub struct HeadingClassifier {
    config: ClassifierConfig,
}

impl HeadingClassifier {
    /// Create a classifier with the given thresholds.
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Thresholds in use.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Whether the pre-filter rules the block out as body prose.
    pub fn is_prose(&self, record: &FeatureRecord) -> bool {
        record.word_count > self.config.max_words || record.ends_with_period
    }

    /// Name and outcome of the first rule that matches, skipping the pre-filter.
    pub fn first_match(&self, record: &FeatureRecord) -> Option<(&'static str, HeadingLevel)> {
        RULES
            .iter()
            .find_map(|rule| (rule.apply)(record, &self.config).map(|level| (rule.name, level)))
    }

    /// Classify one block.
    pub fn classify(&self, record: &FeatureRecord) -> Label {
        if self.is_prose(record) {
            return Label::Paragraph;
        }
        match self.first_match(record) {
            Some((rule, level)) => {
                log::debug!("{:?} -> {} by rule {}", record.text, level, rule);
                Label::Heading(level)
            }
            None => Label::Paragraph,
        }
    }

    /// Classify a document's records, keeping only headings, in input order.
    pub fn classify_all(&self, records: &[FeatureRecord]) -> Vec<Classification> {
        let classifications: Vec<Classification> = records
            .iter()
            .filter_map(|record| {
                self.classify(record)
                    .level()
                    .map(|level| Classification::new(record.clone(), level))
            })
            .collect();

        log::debug!(
            "Accepted {} of {} blocks as headings",
            classifications.len(),
            records.len()
        );
        classifications
    }
}
