//! The ordered cascade of question handlers

use std::sync::OnceLock;

use regex::Regex;

use super::{small_talk, Misses, Query, Stage, StageOutcome};
use crate::error::Result;
use crate::models::SpendLookup;
use crate::store::SpendingStore;
use crate::text::{capitalize, format_money, trim_token};

/// Number of transactions listed for "recent" questions
pub const RECENT_LIMIT: usize = 3;

/// Words after "on"/"in"/"for" that never name a category
const CATEGORY_STOP_WORDS: &[&str] = &["total", "budget", "this", "recent"];

/// Shortest token tried as a store-name fragment by the keyword fallback
const MIN_STORE_TOKEN_LEN: usize = 3;

const HELP_REPLY: &str = "I can answer questions about the expenses you've recorded. Try:\n\
- How much did I spend in total?\n\
- How much did I spend on Food?\n\
- How much have I spent at Walmart?\n\
- Am I over my budget?\n\
- What was my biggest expense?\n\
- What is my top category?\n\
- Show my recent transactions";

const NO_EXPENSES_REPLY: &str = "You have no expenses yet.";

pub(crate) const STAGES: &[Stage] = &[
    Stage {
        name: "small_talk",
        matches: always,
        handle: chit_chat,
    },
    Stage {
        name: "help",
        matches: is_help,
        handle: help,
    },
    Stage {
        name: "total_spent",
        matches: is_total_spent,
        handle: total_spent,
    },
    Stage {
        name: "budget_status",
        matches: is_budget,
        handle: budget_status,
    },
    Stage {
        name: "highest_expense",
        matches: is_highest,
        handle: highest_expense,
    },
    Stage {
        name: "top_category",
        matches: is_top_category,
        handle: top_category,
    },
    Stage {
        name: "category_phrase",
        matches: always,
        handle: category_phrase,
    },
    Stage {
        name: "store_phrase",
        matches: always,
        handle: store_phrase,
    },
    Stage {
        name: "recent",
        matches: is_recent,
        handle: recent,
    },
    Stage {
        name: "keyword_fallback",
        matches: always,
        handle: keyword_fallback,
    },
];

fn category_phrase_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(?:on|in|for)\s+(\w+)").expect("valid regex"))
}

fn store_phrase_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bat\s+(?:the\s+)?(\w+)").expect("valid regex"))
}

// Matchers

fn always(_: &Query) -> bool {
    true
}

fn is_help(q: &Query) -> bool {
    q.contains_any(&["help", "what can you do"])
}

fn is_total_spent(q: &Query) -> bool {
    (q.text().contains("total") && q.text().contains("spent"))
        || q.text().contains("overall spent")
}

fn is_budget(q: &Query) -> bool {
    q.contains_any(&["budget", "limit", "how much left"])
}

fn is_highest(q: &Query) -> bool {
    q.contains_any(&["highest", "biggest", "most expensive"])
}

fn is_top_category(q: &Query) -> bool {
    q.contains_any(&["top category", "most spent on"])
}

fn is_recent(q: &Query) -> bool {
    q.contains_any(&["recent", "last transaction", "latest"])
}

// Handlers

fn chit_chat(_: &dyn SpendingStore, q: &Query, _: &mut Misses) -> Result<StageOutcome> {
    Ok(match small_talk::reply(q.text()) {
        Some(reply) => StageOutcome::Answer(reply.to_string()),
        None => StageOutcome::FallThrough,
    })
}

fn help(_: &dyn SpendingStore, _: &Query, _: &mut Misses) -> Result<StageOutcome> {
    Ok(StageOutcome::Answer(HELP_REPLY.to_string()))
}

fn total_spent(store: &dyn SpendingStore, _: &Query, _: &mut Misses) -> Result<StageOutcome> {
    let total = store.total_spent()?;
    Ok(StageOutcome::Answer(format!(
        "You have spent a total of {} across all transactions.",
        format_money(total)
    )))
}

/// Compares lifetime spending against the budget limit regardless of its period
fn budget_status(store: &dyn SpendingStore, _: &Query, _: &mut Misses) -> Result<StageOutcome> {
    let Some(budget) = store.budget()? else {
        return Ok(StageOutcome::Answer(
            "You haven't set a budget yet. Set one with `penny budget set <amount>`.".to_string(),
        ));
    };

    let spent = store.total_spent()?;
    let remaining = budget.limit_amount - spent;
    let standing = if remaining >= 0.0 { "under" } else { "over" };

    Ok(StageOutcome::Answer(format!(
        "Your {} budget is {} and you have spent {} in total. You are {} budget by {}.",
        budget.period,
        format_money(budget.limit_amount),
        format_money(spent),
        standing,
        format_money(remaining.abs())
    )))
}

fn highest_expense(store: &dyn SpendingStore, _: &Query, _: &mut Misses) -> Result<StageOutcome> {
    let answer = match store.largest_expense()? {
        Some(tx) => format!(
            "Your biggest expense was {} at {} ({}) on {}.",
            format_money(tx.amount),
            tx.store_display(),
            tx.category,
            tx.created_at.format("%b %d")
        ),
        None => NO_EXPENSES_REPLY.to_string(),
    };
    Ok(StageOutcome::Answer(answer))
}

fn top_category(store: &dyn SpendingStore, _: &Query, _: &mut Misses) -> Result<StageOutcome> {
    let answer = match store.top_category()? {
        Some(top) => format!(
            "Your top spending category is {} with {}.",
            top.category,
            format_money(top.total)
        ),
        None => NO_EXPENSES_REPLY.to_string(),
    };
    Ok(StageOutcome::Answer(answer))
}

fn category_phrase(
    store: &dyn SpendingStore,
    q: &Query,
    misses: &mut Misses,
) -> Result<StageOutcome> {
    // Only the word after the first connector is considered
    let Some(candidate) = category_phrase_re()
        .captures(q.text())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|word| !CATEGORY_STOP_WORDS.contains(word))
    else {
        return Ok(StageOutcome::FallThrough);
    };

    let mut lookup = store.category_total_exact(candidate)?;
    if lookup == SpendLookup::NotFound {
        lookup = store.category_total_containing(candidate)?;
    }

    if lookup.is_match() {
        return Ok(StageOutcome::Answer(spent_on(candidate, lookup.amount())));
    }

    misses.record(format!(
        "I couldn't find any spending for the category '{}'.",
        candidate
    ));
    Ok(StageOutcome::FallThrough)
}

fn store_phrase(store: &dyn SpendingStore, q: &Query, misses: &mut Misses) -> Result<StageOutcome> {
    let Some(candidate) = store_phrase_re()
        .captures(q.text())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    else {
        return Ok(StageOutcome::FallThrough);
    };

    let lookup = store.store_total_containing(candidate)?;
    if lookup.is_match() {
        return Ok(StageOutcome::Answer(spent_at(candidate, lookup.amount())));
    }

    misses.record(format!("I couldn't find any spending at '{}'.", candidate));
    Ok(StageOutcome::FallThrough)
}

fn recent(store: &dyn SpendingStore, _: &Query, _: &mut Misses) -> Result<StageOutcome> {
    let transactions = store.recent_transactions(RECENT_LIMIT)?;
    if transactions.is_empty() {
        return Ok(StageOutcome::Answer(
            "No recent transactions found.".to_string(),
        ));
    }

    let header = match transactions.len() {
        1 => "Here is your latest transaction:".to_string(),
        n => format!("Here are your latest {} transactions:", n),
    };
    let lines = transactions.iter().map(|tx| {
        format!(
            "- {}: {} at {}",
            tx.created_at.format("%b %d"),
            format_money(tx.amount),
            tx.store_display()
        )
    });

    Ok(StageOutcome::Answer(
        std::iter::once(header)
            .chain(lines)
            .collect::<Vec<_>>()
            .join("\n"),
    ))
}

/// Scan every word against the category vocabulary, then against store names
fn keyword_fallback(store: &dyn SpendingStore, q: &Query, _: &mut Misses) -> Result<StageOutcome> {
    let vocabulary: Vec<String> = store
        .category_names()?
        .into_iter()
        .map(|name| name.to_lowercase())
        .collect();

    for token in q.text().split_whitespace().map(trim_token) {
        if token.is_empty() {
            continue;
        }

        if vocabulary.iter().any(|name| name == token) {
            let lookup = store.category_total_exact(token)?;
            return Ok(StageOutcome::Answer(spent_on(token, lookup.amount())));
        }

        if token.chars().count() >= MIN_STORE_TOKEN_LEN {
            if let SpendLookup::Found(amount) = store.store_total_containing(token)? {
                return Ok(StageOutcome::Answer(spent_at(token, amount)));
            }
        }
    }

    Ok(StageOutcome::FallThrough)
}

fn spent_on(category: &str, amount: f64) -> String {
    format!(
        "You've spent {} on {}.",
        format_money(amount),
        capitalize(category)
    )
}

fn spent_at(store: &str, amount: f64) -> String {
    format!(
        "You've spent {} at {}.",
        format_money(amount),
        capitalize(store)
    )
}
