//! Sentence and word tokenization for English prose.

use std::sync::LazyLock;

use regex::Regex;

/// Letters, optionally joined by apostrophes or hyphens ("don't", "state-of-the-art").
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\W\d_]+(?:['’\-][^\W\d_]+)*").expect("valid word regex pattern")
});

/// Tokens that end in a period without ending the sentence, unless a
/// capitalized word follows.
const ABBREVIATIONS: &[&str] = &[
    "al", "approx", "co", "eq", "eqs", "fig", "figs", "inc", "jr", "ltd", "no", "ref", "refs",
    "resp", "sec", "sr", "vol",
];

/// Tokens that always lead into the following word, even a capitalized one.
const TITLES: &[&str] = &["cf", "dr", "mr", "mrs", "ms", "prof", "st", "vs"];

const fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

const fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '}' | '’' | '”')
}

/// Split text into sentences, preserving reading order.
///
/// A sentence ends at `.`, `!` or `?` (plus any closing quotes or brackets)
/// followed by whitespace or the end of the text. A period after an
/// abbreviation, an initial or a dotted acronym ends the sentence only when
/// a capitalized word follows and the token cannot be part of a name
/// ("vitamin C. The" splits, "J. Smith" and "e.g. BERT" do not).
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (offset, c) = chars[i];
        if !is_terminal(c) {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < chars.len() && (is_terminal(chars[j].1) || is_closing(chars[j].1)) {
            j += 1;
        }

        let end = chars.get(j).map_or(text.len(), |&(b, _)| b);
        let ends_here = match chars.get(j) {
            None => true,
            Some(&(_, next)) if next.is_whitespace() => {
                c != '.' || period_ends_sentence(&text[start..offset], next_word(&chars[j..]))
            }
            Some(_) => false,
        };

        if ends_here {
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
        i = j;
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

/// Lowercased words of a sentence, punctuation and digits removed.
#[must_use]
pub fn words(sentence: &str) -> Vec<String> {
    WORD_RE.find_iter(sentence).map(|m| m.as_str().to_lowercase()).collect()
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let candidate = candidate.trim();
    if !candidate.is_empty() {
        sentences.push(candidate);
    }
}

fn next_word(rest: &[(usize, char)]) -> Option<char> {
    rest.iter().map(|&(_, c)| c).find(|c| !c.is_whitespace())
}

fn period_ends_sentence(before: &str, next: Option<char>) -> bool {
    let mut tokens = before.split_whitespace().rev().map(strip_opening);
    let token = tokens.next().unwrap_or_default();
    if token.is_empty() {
        return true;
    }

    let lower = token.to_lowercase();
    let is_title = TITLES.contains(&lower.as_str());
    let is_initial = token.chars().count() == 1 && token.chars().all(char::is_alphabetic);
    let is_dotted = token.contains('.')
        && token
            .split('.')
            .all(|p| p.chars().count() <= 2 && p.chars().all(char::is_alphabetic));
    let is_abbreviation = is_title || is_initial || is_dotted || ABBREVIATIONS.contains(&lower.as_str());

    match next {
        Some(c) if c.is_uppercase() => {
            let name_initial = is_initial
                && token.chars().all(char::is_uppercase)
                && tokens.next().is_none_or(|prev| prev.starts_with(char::is_uppercase));
            !(is_title || is_dotted || name_initial)
        }
        _ => !is_abbreviation,
    }
}

fn strip_opening(token: &str) -> &str {
    token.trim_start_matches(|c: char| matches!(c, '(' | '[' | '"' | '\'' | '“' | '‘'))
}
