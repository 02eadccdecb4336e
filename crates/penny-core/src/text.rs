//! Small text helpers shared by the query engine and receipt extractor

/// Lower-case and trim a user query
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Render an amount as `$X.XX`
pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Upper-case the first character and lower-case the rest
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Drop punctuation and collapse whitespace: `"hi, there!!"` -> `"hi there"`
pub fn strip_punctuation(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || c == '\'' {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trim leading and trailing punctuation from a token
pub fn trim_token(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}
