//! Natural-language spending questions
//!
//! A question is lower-cased once and then offered to an ordered list of
//! stages. Each stage has a cheap matcher and a handler that may answer or
//! pass. The most specific, least ambiguous intents come first; loose regex
//! extraction and vocabulary scanning come last.
//!
//! ```text
//! small_talk -> help -> total_spent -> budget_status -> highest_expense
//!   -> top_category -> category_phrase -> store_phrase -> recent
//!   -> keyword_fallback -> (first recorded miss | default reply)
//! ```

use tracing::{debug, warn};

use crate::error::Result;
use crate::store::SpendingStore;

mod small_talk;
mod stages;

/// Reply when nothing matched and no lookup recorded a miss
pub const DEFAULT_REPLY: &str =
    "I'm still learning! Try asking 'How much did I spend total?' or 'How much on Food?'";

/// A normalized question, shared by every stage
#[derive(Debug, Clone)]
pub struct Query {
    text: String,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        Self {
            text: crate::text::normalize_query(raw),
        }
    }

    /// The lower-cased, trimmed question
    pub fn text(&self) -> &str {
        &self.text
    }

    fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.text.contains(n))
    }
}

/// What a stage handler decided
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StageOutcome {
    Answer(String),
    FallThrough,
}

/// Lookups that found nothing, in the order they were tried
///
/// The first one becomes the reply if no later stage answers.
#[derive(Debug, Default)]
pub(crate) struct Misses(Vec<String>);

impl Misses {
    pub(crate) fn record(&mut self, message: String) {
        self.0.push(message);
    }

    fn into_reply(self) -> String {
        self.0
            .into_iter()
            .next()
            .unwrap_or_else(|| DEFAULT_REPLY.to_string())
    }
}

pub(crate) type Matcher = fn(&Query) -> bool;
pub(crate) type Handler = fn(&dyn SpendingStore, &Query, &mut Misses) -> Result<StageOutcome>;

/// One step of the cascade
pub(crate) struct Stage {
    pub name: &'static str,
    pub matches: Matcher,
    pub handle: Handler,
}

/// Answers spending questions from a store
pub struct QueryEngine<'a> {
    store: &'a dyn SpendingStore,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a dyn SpendingStore) -> Self {
        Self { store }
    }

    /// Answer a question
    ///
    /// Never fails: store errors are rendered into the reply.
    pub fn resolve(&self, raw: &str) -> String {
        let query = Query::new(raw);
        match self.run(&query) {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, query = %query.text(), "Failed to answer question");
                format!("I encountered an error: {}", e)
            }
        }
    }

    fn run(&self, query: &Query) -> Result<String> {
        let mut misses = Misses::default();

        for stage in stages::STAGES {
            if !(stage.matches)(query) {
                continue;
            }
            match (stage.handle)(self.store, query, &mut misses)? {
                StageOutcome::Answer(answer) => {
                    debug!(stage = stage.name, "Question answered");
                    return Ok(answer);
                }
                StageOutcome::FallThrough => {
                    debug!(stage = stage.name, "Stage passed");
                }
            }
        }

        debug!("No stage answered, using default reply");
        Ok(misses.into_reply())
    }
}

#[cfg(test)]
mod tests;
