use serde::{Deserialize, Serialize};

/// Configuration for the HTML serializer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattingRules {
    /// Tag wrapped around heading paragraphs
    pub heading_tag: String,

    /// Tag wrapped around regular paragraphs
    pub paragraph_tag: String,

    /// Wrapping of quote-heavy paragraphs
    pub quote_detection: QuoteDetection,

    /// Characters wrapped in their own tag, applied in order
    pub special_characters: Vec<CharacterRule>,

    /// Search/replace rules, applied in order after character wrapping
    pub replacements: Vec<ReplacementRule>,
}

impl Default for FormattingRules {
    fn default() -> Self {
        Self {
            heading_tag: "h3".to_string(),
            paragraph_tag: "p".to_string(),
            quote_detection: QuoteDetection::default(),
            special_characters: Vec::new(),
            replacements: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteDetection {
    pub enabled: bool,

    /// Minimum number of quote characters that triggers the wrap
    pub threshold: usize,

    /// Tag name, optionally followed by attributes (`div class="quote"`)
    pub wrap_tag: String,

    /// Strings counted as quotes, unique and non-empty. Set through
    /// [`QuoteDetection::with_quote_types`] to keep them that way.
    pub quote_types: Vec<String>,
}

impl QuoteDetection {
    /// Replaces the quote set; duplicates and empty strings are dropped.
    pub fn with_quote_types<I, S>(mut self, quote_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.quote_types.clear();
        for quote in quote_types {
            let quote = quote.into();
            if !quote.is_empty() && !self.quote_types.contains(&quote) {
                self.quote_types.push(quote);
            }
        }
        self
    }

    /// Number of non-overlapping quote occurrences in `text`, summed over
    /// the quote set.
    pub fn count_quotes(&self, text: &str) -> usize {
        self.quote_types
            .iter()
            .map(|quote| text.matches(quote.as_str()).count())
            .sum()
    }

    /// Whether a paragraph with this plain text gets the outer wrap.
    pub fn should_wrap(&self, text: &str) -> bool {
        self.enabled && self.count_quotes(text) >= self.threshold
    }

    /// Splits the wrap specification into its opening and closing tags.
    pub fn wrap_tags(&self) -> (String, String) {
        parse_wrap_tag(&self.wrap_tag)
    }
}

impl Default for QuoteDetection {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: 3,
            wrap_tag: "div class=\"blockquote\"".to_string(),
            quote_types: default_quote_types(),
        }
    }
}

/// Straight and curly double and single quotes.
pub fn default_quote_types() -> Vec<String> {
    ["\"", "\u{201C}", "\u{201D}", "'", "\u{2018}", "\u{2019}"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Parses `blockquote` or `div class="quote"` into `(opening, closing)`.
pub fn parse_wrap_tag(spec: &str) -> (String, String) {
    let spec = spec.trim();
    let name = spec.split_whitespace().next().unwrap_or(spec);
    (format!("<{spec}>"), format!("</{name}>"))
}

/// Wraps every occurrence of `character` in `wrap_tag`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRule {
    pub character: String,
    pub wrap_tag: String,
    pub enabled: bool,
}

impl CharacterRule {
    pub fn new(character: impl Into<String>, wrap_tag: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            wrap_tag: wrap_tag.into(),
            enabled: true,
        }
    }
}

/// A literal search/replace applied to the finished HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplacementRule {
    pub search: String,
    pub replace: String,
    pub case_sensitive: bool,
}

impl ReplacementRule {
    pub fn new(search: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            replace: replace.into(),
            case_sensitive: true,
        }
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }
}
