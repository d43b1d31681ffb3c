//! Knowledge-Article Suggestion Generator
//!
//! Ranks knowledge-base articles against an incident by shared keyword
//! tokens. Read-only: suggestions are returned, never persisted.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::entities::{Dao, Incident, KnowledgeBaseArticle};
use crate::error::StoreResult;
use crate::logic::analyzer::rules::clamp01;
use crate::store::RecordStore;

// ============================================================================
// TUNING
// ============================================================================

/// Tokens shorter than this carry no signal
pub const MIN_TOKEN_LEN: usize = 4;

/// Only the first tokens of the incident text are considered
pub const MAX_TOKENS: usize = 25;

/// Raw match count is normalized against this divisor
pub const SCORE_DIVISOR: f64 = 10.0;

/// Suggestions below this relevance are dropped
pub const MIN_RELEVANCE: f64 = 0.25;

/// Result cap
pub const MAX_SUGGESTIONS: usize = 6;

/// Relevance tiers for the textual reason
pub const STRONG_RELEVANCE: f64 = 0.7;
pub const PARTIAL_RELEVANCE: f64 = 0.4;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("static pattern"));

// ============================================================================
// SUGGESTIONS
// ============================================================================

/// One ranked article. Not a stored entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSuggestion {
    pub article_id: String,
    pub title: String,
    /// 0..=1, normalized shared-token count
    pub relevance: f64,
    pub reason: String,
}

/// Lowercase, split on non-word characters, drop short tokens, take the
/// first `MAX_TOKENS`.
pub fn tokenize(text: &str) -> Vec<String> {
    NON_WORD
        .split(&text.to_lowercase())
        .filter(|t| t.len() >= MIN_TOKEN_LEN)
        .map(|t| t.to_string())
        .take(MAX_TOKENS)
        .collect()
}

/// Count of incident tokens contained in the article's title, summary and
/// tags.
fn score_article(tokens: &[String], article: &KnowledgeBaseArticle) -> usize {
    let haystack = format!(
        "{} {} {}",
        article.title,
        article.summary,
        article.tags.join(" ")
    )
    .to_lowercase();
    tokens.iter().filter(|t| haystack.contains(t.as_str())).count()
}

fn reason_for(relevance: f64) -> String {
    if relevance > STRONG_RELEVANCE {
        "Strong keyword match with the incident context".to_string()
    } else if relevance > PARTIAL_RELEVANCE {
        "Partial keyword match with the incident context".to_string()
    } else {
        "Weak keyword match with the incident context".to_string()
    }
}

/// Rank all knowledge-base articles against the incident. Pure function of
/// the store snapshot: same incident + same articles = same ranking.
pub fn suggest_knowledge_articles(
    store: &RecordStore,
    incident_id: &str,
) -> StoreResult<Vec<ArticleSuggestion>> {
    let incident = Dao::<Incident>::get(store, incident_id)?;
    let tokens = incident_tokens(&incident);

    let articles = Dao::<KnowledgeBaseArticle>::list(store, None, Some(1000))?;
    let mut suggestions: Vec<ArticleSuggestion> = articles
        .into_iter()
        .filter_map(|article| {
            let score = score_article(&tokens, &article);
            let relevance = clamp01(score as f64 / SCORE_DIVISOR);
            if relevance < MIN_RELEVANCE {
                return None;
            }
            Some(ArticleSuggestion {
                article_id: article.id.unwrap_or_default(),
                title: article.title,
                relevance,
                reason: reason_for(relevance),
            })
        })
        .collect();

    // Stable sort: equal relevance keeps the newest-first article order
    suggestions.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    suggestions.truncate(MAX_SUGGESTIONS);
    Ok(suggestions)
}

fn incident_tokens(incident: &Incident) -> Vec<String> {
    let text = format!(
        "{} {} {}",
        incident.title,
        incident.description,
        incident.affected_systems.join(" ")
    );
    tokenize(&text)
}

// ============================================================================
// TESTS
// ============================================================================
