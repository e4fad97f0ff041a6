//! Mention enrichment: lexicon sentiment, keyword extraction, categorization.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use uuid::Uuid;

use brandpulse_core::{Brand, Category, Mention, RawMention, Sentiment};

/// AFINN-style word weights.
///
/// Keys are lowercase single words; a mention's score is the plain sum of
/// every matching token. Labels need the sum to clear the thresholds, so a
/// lone `+2` or `-2` word stays neutral.
const LEXICON: &[(&str, i32)] = &[
    // Positive signals
    ("amazing", 4),
    ("awesome", 4),
    ("best", 3),
    ("brilliant", 4),
    ("excellent", 3),
    ("excited", 3),
    ("fantastic", 4),
    ("good", 3),
    ("great", 3),
    ("happy", 3),
    ("impressed", 3),
    ("impressive", 3),
    ("innovative", 2),
    ("love", 3),
    ("loved", 3),
    ("nice", 3),
    ("outstanding", 5),
    ("perfect", 3),
    ("recommend", 2),
    ("reliable", 2),
    ("smooth", 2),
    ("solid", 2),
    ("superb", 5),
    ("useful", 2),
    ("win", 4),
    ("wonderful", 4),
    ("worth", 2),
    // Negative signals
    ("angry", -3),
    ("awful", -3),
    ("bad", -3),
    ("broken", -1),
    ("buggy", -2),
    ("crash", -2),
    ("defective", -3),
    ("disappointed", -2),
    ("disappointing", -2),
    ("dreadful", -3),
    ("fail", -2),
    ("failed", -2),
    ("failure", -2),
    ("faulty", -2),
    ("fraud", -4),
    ("hate", -3),
    ("horrible", -3),
    ("overpriced", -2),
    ("poor", -2),
    ("problem", -2),
    ("refund", -2),
    ("scam", -2),
    ("slow", -2),
    ("terrible", -3),
    ("unreliable", -2),
    ("useless", -2),
    ("worst", -3),
    ("worthless", -2),
    ("wrong", -2),
];

/// Words excluded from keyword extraction.
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had", "do", "does",
    "did", "will", "would", "should", "could", "may", "might", "must", "can", "this", "that",
    "these", "those", "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us",
    "them", "my", "your", "his", "its", "our", "their", "what", "which", "who", "whom", "whose",
    "where", "when", "why", "how", "all", "each", "every", "both", "few", "more", "most", "other",
    "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very",
    "just", "about", "into", "through", "during", "before", "after", "above", "below", "up",
    "down", "out", "off", "over", "under", "again", "further", "then", "once",
];

/// Substring rules per category, checked in [`Category::ALL`] precedence
/// order. First match wins; no match means `General`.
const CATEGORY_PATTERNS: &[(Category, &str)] = &[
    (
        Category::Complaint,
        "bad|poor|terrible|awful|horrible|worst|hate|disappointed|complaint|issue|problem|broken|defect|faulty|error|bug",
    ),
    (
        Category::Review,
        "review|rating|stars|recommend|suggest|opinion|thoughts|experience",
    ),
    (
        Category::Product,
        "product|feature|launch|release|new|update|version|upgrade|announcement",
    ),
    (
        Category::Support,
        "support|help|assistance|customer service|ticket|query|question|contact",
    ),
];

/// Scores strictly above this are labeled positive.
const POSITIVE_THRESHOLD: i32 = 2;
/// Scores strictly below this are labeled negative.
const NEGATIVE_THRESHOLD: i32 = -2;

const MAX_KEYWORDS: usize = 5;

/// Turns a [`RawMention`] into a fully labeled [`Mention`] in one pass.
///
/// Sentiment, keywords, and category are all derived from the same composed
/// `title content` text, so the three stay consistent with each other.
pub struct Enricher {
    lexicon: HashMap<&'static str, i32>,
    stopwords: HashSet<&'static str>,
    category_rules: Vec<(Category, Regex)>,
}

impl Enricher {
    #[must_use]
    pub fn new() -> Self {
        let category_rules = CATEGORY_PATTERNS
            .iter()
            .map(|&(category, pattern)| {
                (
                    category,
                    Regex::new(pattern).expect("valid category pattern"),
                )
            })
            .collect();
        Self {
            lexicon: LEXICON.iter().copied().collect(),
            stopwords: STOPWORDS.iter().copied().collect(),
            category_rules,
        }
    }

    /// Enrich one raw mention for the given brand.
    #[must_use]
    pub fn enrich(&self, raw: RawMention, brand: &Brand) -> Mention {
        let composed = format!("{} {}", raw.title, raw.content);
        let text = composed.trim();

        let (sentiment, sentiment_score) = self.score_sentiment(text);
        let keywords = self.extract_keywords(text);
        let category = self.categorize(text);

        Mention {
            id: Uuid::new_v4(),
            source: raw.source,
            title: raw.title,
            content: raw.content,
            url: raw.url,
            author: raw.author,
            published_at: raw.published_at,
            sentiment,
            sentiment_score,
            category,
            keywords,
            brand_id: brand.id,
            brand_name: brand.name.clone(),
        }
    }

    /// Sum lexicon weights over the text and map the total to a label.
    fn score_sentiment(&self, text: &str) -> (Sentiment, i32) {
        let mut score = 0;
        for word in text.split_whitespace() {
            let token = word
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if let Some(weight) = self.lexicon.get(token.as_str()) {
                score += weight;
            }
        }

        let label = if score > POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };
        (label, score)
    }

    /// Extract up to [`MAX_KEYWORDS`] frequent words, most frequent first.
    ///
    /// Tokens are ASCII word characters; anything else splits the word. Words
    /// of 3 characters or fewer and stopwords never qualify. Ties keep
    /// first-seen order.
    fn extract_keywords(&self, text: &str) -> Vec<String> {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        let mut counts: HashMap<&str, u32> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for word in cleaned.split_whitespace() {
            if word.len() <= 3 || self.stopwords.contains(word) {
                continue;
            }
            let entry = counts.entry(word).or_insert(0);
            if *entry == 0 {
                order.push(word);
            }
            *entry += 1;
        }

        // sort_by is stable, so equal counts preserve first-seen order.
        order.sort_by(|a, b| counts[b].cmp(&counts[a]));
        order
            .into_iter()
            .take(MAX_KEYWORDS)
            .map(str::to_string)
            .collect()
    }

    fn categorize(&self, text: &str) -> Category {
        let lower = text.to_lowercase();
        for (category, rule) in &self.category_rules {
            if rule.is_match(&lower) {
                return *category;
            }
        }
        Category::General
    }
}

impl Default for Enricher {
    fn default() -> Self {
        Self::new()
    }
}
