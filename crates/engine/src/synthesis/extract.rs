//! Pattern extraction over retrieved passage text
//!
//! Every extractor is a pure best-effort scan returning whatever it found;
//! the synthesizer substitutes fixed fallback blocks when a scan comes back
//! empty. Keyword tables are bilingual (English/Russian) and matched as
//! substrings against lowercased text.

use regex_lite::Regex;
use std::sync::OnceLock;

/// Sentence-ending punctuation across scripts
const SENTENCE_ENDERS: &[char] = &['.', '!', '?', '؟', '。', '！', '？', '…'];

/// Words signalling a process description
const PROCESS_KEYWORDS: &[&str] = &[
    "then", "after", "next", "receives", "sends", "assigned", "затем", "после", "далее",
    "получает", "отправляет", "передает", "передаёт", "назнача",
];

/// Words signalling a described problem
const PROBLEM_KEYWORDS: &[&str] = &[
    "problem",
    "issue",
    "difficult",
    "challenge",
    "struggl",
    "bottleneck",
    "теря",
    "ошибк",
    "проблем",
    "сложност",
    "трудност",
    "узкое место",
];

/// Words signalling a described solution
const SOLUTION_KEYWORDS: &[&str] = &[
    "solution",
    "solv",
    "resolve",
    "helps",
    "provides",
    "enables",
    "automat",
    "eliminat",
    "решен",
    "решает",
    "помогает",
    "позволяет",
    "автоматизир",
    "устраняет",
];

/// Words signalling pricing talk
const PRICE_KEYWORDS: &[&str] = &[
    "price",
    "pricing",
    "cost",
    "subscription",
    "license",
    "tariff",
    "per month",
    "per user",
    "цена",
    "цены",
    "стоимост",
    "тариф",
    "подписк",
    "лицензи",
    "в месяц",
];

fn numbered_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Item text stops at the next digit so inline lists ("1. ... 2. ...")
    // split into separate items.
    RE.get_or_init(|| Regex::new(r"(\d{1,2})[.):\-]\s+([^\n.!?\d]{5,160})").unwrap())
}

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"https?://[^\s)>"']+"#).unwrap())
}

fn price_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[$€£₽]\s?\d(?:[\d .,]*\d)?|\d(?:[\d .,]*\d)?\s?(?:USD|EUR|RUB|руб|[$€£₽])")
            .unwrap()
    })
}

fn contains_any(sentence: &str, keywords: &[&str]) -> bool {
    let lowered = sentence.to_lowercase();
    keywords.iter().any(|kw| lowered.contains(kw))
}

/// Split free text into trimmed sentences on terminal punctuation
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(|c: char| SENTENCE_ENDERS.contains(&c))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// First `max` sentences longer than `min_chars` characters
pub fn summary_sentences(text: &str, min_chars: usize, max: usize) -> Vec<String> {
    split_sentences(text)
        .into_iter()
        .filter(|s| s.chars().count() > min_chars)
        .take(max)
        .collect()
}

/// Sentences that read like process steps
pub fn workflow_sentences(text: &str, max: usize) -> Vec<String> {
    split_sentences(text)
        .into_iter()
        .filter(|s| contains_any(s, PROCESS_KEYWORDS))
        .take(max)
        .collect()
}

/// Numbered-list items: digits, punctuation, then item text
pub fn numbered_items(text: &str, max: usize) -> Vec<String> {
    numbered_item_re()
        .captures_iter(text)
        .filter_map(|cap| cap.get(2).map(|m| m.as_str().trim().to_string()))
        .take(max)
        .collect()
}

/// URL-like substrings
pub fn extract_urls(text: &str, max: usize) -> Vec<String> {
    url_re()
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',']).to_string())
        .take(max)
        .collect()
}

/// Price-like substrings (currency symbol or code next to a number)
pub fn price_mentions(text: &str, max: usize) -> Vec<String> {
    price_re()
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .take(max)
        .collect()
}

/// Whether the text talks about pricing at all
pub fn has_pricing_signal(text: &str) -> bool {
    price_re().is_match(text) || contains_any(text, PRICE_KEYWORDS)
}

/// Problem sentences immediately followed by a solution sentence
pub fn problem_solution_pairs(sentences: &[String], max: usize) -> Vec<(String, String)> {
    sentences
        .windows(2)
        .filter(|pair| {
            contains_any(&pair[0], PROBLEM_KEYWORDS) && contains_any(&pair[1], SOLUTION_KEYWORDS)
        })
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .take(max)
        .collect()
}
