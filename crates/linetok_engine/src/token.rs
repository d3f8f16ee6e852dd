use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, line: &str) -> Vec<String>;
}

/// Simple, deterministic whitespace tokenizer.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_owned).collect()
    }
}

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        let pattern = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("treebank rule {pattern:?} failed to compile: {e}"));
        Self {
            pattern,
            replacement,
        }
    }

    fn apply(&self, text: String) -> String {
        self.pattern
            .replace_all(&text, self.replacement)
            .into_owned()
    }
}

/// Penn Treebank style word tokenizer.
///
/// Splits punctuation off words, turns double quotes into Treebank quote
/// pairs, separates clitics (`'s`, `n't`, `'ll`, ...) and splits the handful of
/// fused contractions the Treebank convention lists (`cannot`, `gonna`, ...).
///
/// A line is first cut into sentences at `.`, `?` or `!` followed by
/// whitespace and a capitalized word, so every sentence-final period becomes
/// its own token. A period after a known abbreviation or a single-letter
/// initial does not end a sentence.
/// The rule table is compiled once per instance.
pub struct TreebankTokenizer {
    sentence_end: Regex,
    before_padding: Vec<Rule>,
    after_padding: Vec<Rule>,
}

impl TreebankTokenizer {
    pub fn new() -> Self {
        let before_padding = vec![
            // starting quotes
            Rule::new(r#"^""#, "``"),
            Rule::new(r"(``)", " ${1} "),
            Rule::new(r#"([ (\[{<])("|'')"#, "${1} `` "),
            Rule::new(r"[«“‘„]", " ${0} "),
            // punctuation
            Rule::new(r"([:,])([^\d])", " ${1} ${2}"),
            Rule::new(r"([:,])$", " ${1} "),
            Rule::new(r"\.\.\.", " ... "),
            Rule::new(r"[;@#$%&]", " ${0} "),
            Rule::new(r#"([^.])(\.)([\]\)}>"'”’»]*)\s*$"#, "${1} ${2}${3} "),
            Rule::new(r"[?!]", " ${0} "),
            Rule::new(r"([^'])' ", "${1} ' "),
            // brackets
            Rule::new(r"[\]\[\(\)\{\}<>]", " ${0} "),
            Rule::new(r"--", " -- "),
        ];

        let after_padding = vec![
            // ending quotes
            Rule::new(r#"""#, " '' "),
            Rule::new(r"[»”’]", " ${0} "),
            Rule::new(r"(\S)('')", "${1} ${2} "),
            Rule::new(r"([^' ])('[sS]|'[mM]|'[dD]|') ", "${1} ${2} "),
            Rule::new(r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "${1} ${2} "),
            // fused contractions
            Rule::new(r"(?i)\b(can)(not)\b", " ${1} ${2} "),
            Rule::new(r"(?i)\b(d)('ye)\b", " ${1} ${2} "),
            Rule::new(r"(?i)\b(gim)(me)\b", " ${1} ${2} "),
            Rule::new(r"(?i)\b(gon)(na)\b", " ${1} ${2} "),
            Rule::new(r"(?i)\b(got)(ta)\b", " ${1} ${2} "),
            Rule::new(r"(?i)\b(lem)(me)\b", " ${1} ${2} "),
            Rule::new(r"(?i)\b(mor)('n)\b", " ${1} ${2} "),
            Rule::new(r"(?i)\b(wan)(na)\s", " ${1} ${2} "),
            Rule::new(r"(?i) ('t)(is)\b", " ${1} ${2} "),
            Rule::new(r"(?i) ('t)(was)\b", " ${1} ${2} "),
        ];

        Self {
            sentence_end: Regex::new(r#"[.?!]["'”’»)\]]*\s+"#)
                .unwrap_or_else(|e| panic!("sentence boundary failed to compile: {e}")),
            before_padding,
            after_padding,
        }
    }

    fn sentences<'t>(&self, line: &'t str) -> Vec<&'t str> {
        let mut sentences = Vec::new();
        let mut start = 0;
        for boundary in self.sentence_end.find_iter(line) {
            let next = line[boundary.end()..].chars().next();
            if !next.is_some_and(opens_sentence) {
                continue;
            }
            if line[boundary.start()..].starts_with('.')
                && ends_with_abbreviation(&line[start..boundary.start()])
            {
                continue;
            }
            sentences.push(line[start..boundary.end()].trim_end());
            start = boundary.end();
        }
        if start < line.len() {
            sentences.push(&line[start..]);
        }
        sentences
    }

    fn tokenize_sentence(&self, sentence: &str) -> Vec<String> {
        let text = self
            .before_padding
            .iter()
            .fold(sentence.to_owned(), |text, rule| rule.apply(text));
        // Clitic rules anchor on a trailing space.
        let text = self
            .after_padding
            .iter()
            .fold(format!(" {text} "), |text, rule| rule.apply(text));
        text.split_whitespace().map(str::to_owned).collect()
    }
}

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "st", "jr", "sr", "vs", "etc", "e.g", "i.e", "no", "fig",
    "inc", "ltd", "co", "mt", "gen", "col", "sgt", "rev",
];

fn opens_sentence(c: char) -> bool {
    c.is_uppercase() || matches!(c, '"' | '“' | '‘' | '«' | '(' | '[')
}

fn ends_with_abbreviation(text: &str) -> bool {
    let Some(word) = text.split_whitespace().last() else {
        return false;
    };
    let word = word.trim_start_matches(|c: char| !c.is_alphanumeric());
    let mut chars = word.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return c.is_alphabetic();
    }
    let word = word.to_lowercase();
    ABBREVIATIONS.contains(&word.as_str())
}

impl Default for TreebankTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TreebankTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreebankTokenizer")
            .field("rules", &(self.before_padding.len() + self.after_padding.len()))
            .finish()
    }
}

impl Tokenizer for TreebankTokenizer {
    fn tokenize(&self, line: &str) -> Vec<String> {
        self.sentences(line)
            .into_iter()
            .flat_map(|sentence| self.tokenize_sentence(sentence))
            .collect()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    #[default]
    Treebank,
    Whitespace,
}

impl TokenizerKind {
    pub fn build(self) -> Box<dyn Tokenizer> {
        match self {
            TokenizerKind::Treebank => Box::new(TreebankTokenizer::new()),
            TokenizerKind::Whitespace => Box::new(WhitespaceTokenizer),
        }
    }
}

impl fmt::Display for TokenizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerKind::Treebank => write!(f, "treebank"),
            TokenizerKind::Whitespace => write!(f, "whitespace"),
        }
    }
}

impl FromStr for TokenizerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "treebank" => Ok(TokenizerKind::Treebank),
            "whitespace" => Ok(TokenizerKind::Whitespace),
            other => Err(format!(
                "unknown tokenizer {other:?} (expected treebank or whitespace)"
            )),
        }
    }
}
