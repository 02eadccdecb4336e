//! Canned replies for conversational filler

use crate::text::strip_punctuation;

const GREETING: &str =
    "Hello! I'm Penny, your spending assistant. Ask me about your totals, categories, stores or budget.";
const THANKS: &str = "You're welcome! Anything else you'd like to know about your spending?";
const STATUS: &str = "I'm doing great, thanks for asking! Ready to crunch some numbers for you.";
const FAREWELL: &str = "Goodbye! Keep those receipts coming.";
const IDENTITY: &str =
    "I'm Penny, a small assistant that answers questions about the expenses you've recorded.";
const PRAISE: &str = "Thank you! Happy to help you keep an eye on your money.";

/// Phrase groups and the reply every phrase in the group shares
const TABLE: &[(&[&str], &str)] = &[
    (
        &[
            "hello",
            "hi",
            "hey",
            "hiya",
            "howdy",
            "greetings",
            "good morning",
            "good afternoon",
            "good evening",
            "hi there",
            "hello there",
        ],
        GREETING,
    ),
    (
        &["thanks", "thank you", "thx", "cheers", "appreciate it"],
        THANKS,
    ),
    (
        &[
            "how are you",
            "how are you doing",
            "how's it going",
            "hows it going",
            "what's up",
            "whats up",
        ],
        STATUS,
    ),
    (
        &["bye", "goodbye", "see you", "see ya", "good night"],
        FAREWELL,
    ),
    (
        &[
            "who are you",
            "what are you",
            "what is your name",
            "what's your name",
            "whats your name",
        ],
        IDENTITY,
    ),
    (
        &[
            "good job",
            "great job",
            "well done",
            "awesome",
            "you're great",
            "you rock",
            "nice work",
        ],
        PRAISE,
    ),
];

/// Single-word phrases only count in queries this short
const MAX_WORDS_FOR_SINGLE: usize = 3;

/// Find a canned reply for the (already lower-cased) query
pub(crate) fn reply(query: &str) -> Option<&'static str> {
    let stripped = strip_punctuation(query);
    if stripped.is_empty() {
        return None;
    }
    let words: Vec<&str> = stripped.split(' ').collect();
    let padded = format!(" {} ", stripped);

    TABLE.iter().find_map(|(phrases, response)| {
        phrases
            .iter()
            .any(|phrase| {
                if stripped == *phrase {
                    true
                } else if phrase.contains(' ') {
                    padded.contains(&format!(" {} ", phrase))
                } else {
                    words.len() <= MAX_WORDS_FOR_SINGLE && words.contains(phrase)
                }
            })
            .then_some(*response)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greetings_share_a_reply() {
        for greeting in ["hello", "hi", "hey", "good morning", "hi there!", "hey penny"] {
            assert_eq!(reply(greeting), Some(GREETING), "greeting: {}", greeting);
        }
    }

    #[test]
    fn test_groups() {
        assert_eq!(reply("thank you so much"), Some(THANKS));
        assert_eq!(reply("how's it going?"), Some(STATUS));
        assert_eq!(reply("bye"), Some(FAREWELL));
        assert_eq!(reply("who are you"), Some(IDENTITY));
        assert_eq!(reply("great job penny"), Some(PRAISE));
    }

    #[test]
    fn test_single_words_need_whole_word_in_short_query() {
        // "hi" inside "highest" is not a greeting
        assert_eq!(reply("highest expense"), None);
        // Too long for a bare single word
        assert_eq!(reply("hey how much did i spend on food"), None);
        assert_eq!(reply("how much on food"), None);
        assert_eq!(reply(""), None);
    }
}
