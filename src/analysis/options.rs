//! Heading classifier thresholds.

/// Thresholds used by the heading rule cascade.
///
/// The defaults are the tuned values the cascade was designed around;
/// changing them changes which blocks become headings.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Blocks with more words than this are never headings
    pub max_words: usize,

    /// Prefix that marks an appendix heading
    pub appendix_prefix: String,

    /// Bold text larger than `body * bold_h1_ratio` is H1
    pub bold_h1_ratio: f32,

    /// Bold text larger than `body * bold_h2_ratio` is H2 (otherwise H3)
    pub bold_h2_ratio: f32,

    /// All-caps text with fewer words than this is H1
    pub caps_max_words: usize,

    /// Any text larger than `body * large_text_ratio` is H1
    pub large_text_ratio: f32,
}

impl ClassifierConfig {
    /// Create a config with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the word limit for heading candidates.
    pub fn with_max_words(mut self, words: usize) -> Self {
        self.max_words = words;
        self
    }

    /// Set the appendix heading prefix.
    pub fn with_appendix_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.appendix_prefix = prefix.into();
        self
    }

    /// Set the bold size ratios for H1 and H2.
    pub fn with_bold_ratios(mut self, h1: f32, h2: f32) -> Self {
        self.bold_h1_ratio = h1;
        self.bold_h2_ratio = h2;
        self
    }

    /// Set the word limit for all-caps headings.
    pub fn with_caps_max_words(mut self, words: usize) -> Self {
        self.caps_max_words = words;
        self
    }

    /// Set the size ratio for unstyled large headings.
    pub fn with_large_text_ratio(mut self, ratio: f32) -> Self {
        self.large_text_ratio = ratio;
        self
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_words: 30,
            appendix_prefix: "Appendix ".to_string(),
            bold_h1_ratio: 1.3,
            bold_h2_ratio: 1.1,
            caps_max_words: 10,
            large_text_ratio: 1.5,
        }
    }
}
