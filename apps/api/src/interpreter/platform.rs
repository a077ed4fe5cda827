//! Platform detection — first matching rule in `PLATFORM_RULES` wins.

use serde::{Deserialize, Serialize};

use crate::models::prompt::Platform;

/// Bump whenever `PLATFORM_RULES` changes order or tokens.
pub const PLATFORM_RULES_VERSION: u32 = 1;

/// How short tokens ("ig", "yt", "fb", "x", "on x") are matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenMatching {
    /// Raw containment. Reproduces the historical behaviour, false positives included
    /// ("design" reads as Instagram).
    #[default]
    Substring,
    /// Short tokens must be delimited by non-alphanumeric characters or the text edges.
    WholeWord,
}

impl std::str::FromStr for TokenMatching {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substring" => Ok(TokenMatching::Substring),
            "whole-word" | "whole_word" | "word" => Ok(TokenMatching::WholeWord),
            other => Err(format!("unknown token matching mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Token {
    /// Always matched as a substring.
    Name(&'static str),
    /// Matched according to `TokenMatching`. The second field is the substring
    /// form used in `Substring` mode.
    Short(&'static str, &'static str),
}

const PLATFORM_RULES: &[(Platform, &[Token])] = &[
    (Platform::TikTok, &[Token::Name("tiktok")]),
    (
        Platform::Instagram,
        &[Token::Name("instagram"), Token::Short("ig", "ig")],
    ),
    (
        Platform::YouTube,
        &[Token::Name("youtube"), Token::Short("yt", "yt")],
    ),
    (Platform::Reddit, &[Token::Name("reddit")]),
    (Platform::Pinterest, &[Token::Name("pinterest")]),
    (
        Platform::Facebook,
        &[Token::Name("facebook"), Token::Short("fb", "fb")],
    ),
    (
        Platform::X,
        &[
            Token::Name("twitter"),
            Token::Name("x.com"),
            Token::Short("x", "x "),
            Token::Short("on x", "on x"),
        ],
    ),
];

/// Returns the first platform whose rule matches `text`, case-insensitively.
pub fn detect_platform(text: &str, matching: TokenMatching) -> Option<Platform> {
    let lower = text.to_lowercase();
    PLATFORM_RULES
        .iter()
        .find(|(_, tokens)| tokens.iter().any(|t| token_matches(&lower, *t, matching)))
        .map(|(platform, _)| *platform)
}

fn token_matches(lower: &str, token: Token, matching: TokenMatching) -> bool {
    match (token, matching) {
        (Token::Name(name), _) => lower.contains(name),
        (Token::Short(_, raw), TokenMatching::Substring) => lower.contains(raw),
        (Token::Short(word, _), TokenMatching::WholeWord) => contains_word(lower, word),
    }
}

fn contains_word(haystack: &str, word: &str) -> bool {
    haystack.match_indices(word).any(|(start, _)| {
        let end = start + word.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
