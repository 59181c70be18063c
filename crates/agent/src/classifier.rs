//! Message classification by keyword patterns. Never calls the backend.

use regex_lite::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Only this many characters of a message are inspected.
pub const INSPECTION_WINDOW: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Hello,
    Bye,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "polarity", rename_all = "snake_case")]
pub enum Classification {
    Greeting(Polarity),
    OutOfScope,
    NeedsContext,
    General,
}

static GREETING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:hello|hi|hey|greetings|good (?:morning|afternoon|evening)|sup|yo|sorry|apologies|oops|my bad|bye|goodbye|see you|farewell)\b",
    )
    .expect("valid regex")
});

static FAREWELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:bye|goodbye|see you|farewell)\b").expect("valid regex")
});

/// Entertainment, personal-life and small-talk topics.
pub const OUT_OF_SCOPE_KEYWORDS: &[&str] = &[
    "singing",
    "cooking",
    "music",
    "art",
    "hobbies",
    "personal life",
    "favorite food",
    "what is love",
    "meaning of life",
    "how are you feeling",
    "what do you think about",
    "who are you",
    "tell me about yourself",
    "weather",
    "politics",
    "movie",
    "movies",
    "book",
    "books",
    "sports",
    "game",
    "games",
    "song",
    "songs",
    "entertainment",
    "tell me a story",
    "joke",
    "jokes",
    "what to do today",
    "how was your day",
];

/// The portfolio subject and his work. Matched as word prefixes, so
/// "projects" and "skills" hit "project" and "skill".
pub const DOMAIN_KEYWORDS: &[&str] = &[
    "vazeer",
    "portfolio",
    "resume",
    "project",
    "skill",
    "experience",
    "education",
    "certification",
    "covid-19",
    "house price",
    "chat assistant",
    "visualization",
    "navigation",
    "chat bot",
    "swecha",
];

fn alternation(keywords: &[String]) -> String {
    keywords
        .iter()
        .map(|k| regex_lite::escape(k))
        .collect::<Vec<_>>()
        .join("|")
}

fn compile(keywords: &[String], trailing_boundary: bool) -> Option<Regex> {
    if keywords.is_empty() {
        return None;
    }
    let tail = if trailing_boundary { r"\b" } else { "" };
    Regex::new(&format!(r"\b(?:{}){tail}", alternation(keywords))).ok()
}

fn lowered(keywords: impl IntoIterator<Item = impl AsRef<str>>) -> Vec<String> {
    keywords
        .into_iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Pure, deterministic message classifier.
#[derive(Debug, Clone)]
pub struct Classifier {
    out_of_scope: Option<Regex>,
    domain: Option<Regex>,
}

impl Classifier {
    /// Build with the built-in keyword sets extended by extra terms.
    pub fn new(extra_domain: &[String], extra_out_of_scope: &[String]) -> Self {
        let out_of_scope = lowered(
            OUT_OF_SCOPE_KEYWORDS
                .iter()
                .copied()
                .chain(extra_out_of_scope.iter().map(String::as_str)),
        );
        let domain = lowered(
            DOMAIN_KEYWORDS
                .iter()
                .copied()
                .chain(extra_domain.iter().map(String::as_str)),
        );
        Self {
            out_of_scope: compile(&out_of_scope, true),
            domain: compile(&domain, false),
        }
    }

    pub fn classify(&self, message: &str) -> Classification {
        let window: String = message.chars().take(INSPECTION_WINDOW).collect();
        let text = window.to_lowercase();

        if GREETING.is_match(&text) {
            let polarity = if FAREWELL.is_match(&text) {
                Polarity::Bye
            } else {
                Polarity::Hello
            };
            return Classification::Greeting(polarity);
        }

        if self.out_of_scope.as_ref().is_some_and(|re| re.is_match(&text)) {
            return Classification::OutOfScope;
        }

        if self.domain.as_ref().is_some_and(|re| re.is_match(&text)) {
            return Classification::NeedsContext;
        }

        Classification::General
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&[], &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(msg: &str) -> Classification {
        Classifier::default().classify(msg)
    }

    #[test]
    fn reference_cases() {
        assert_eq!(classify("Hello there"), Classification::Greeting(Polarity::Hello));
        assert_eq!(classify("goodbye for now"), Classification::Greeting(Polarity::Bye));
        assert_eq!(classify("what's your favorite movie"), Classification::OutOfScope);
        assert_eq!(
            classify("tell me about your skills, Vazeer"),
            Classification::NeedsContext
        );
        assert_eq!(classify("explain a for loop"), Classification::General);
    }

    #[test]
    fn greeting_needs_word_boundary() {
        // "hi" inside "this" or "which" is not a greeting.
        assert_eq!(classify("which algorithm is this"), Classification::General);
        assert_eq!(classify("HI!"), Classification::Greeting(Polarity::Hello));
        assert_eq!(classify("sorry, my mistake"), Classification::Greeting(Polarity::Hello));
        assert_eq!(classify("Good evening"), Classification::Greeting(Polarity::Hello));
        assert_eq!(classify("ok see you later"), Classification::Greeting(Polarity::Bye));
    }

    #[test]
    fn greeting_beats_scope_rules() {
        assert_eq!(
            classify("hi, what movies does Vazeer like"),
            Classification::Greeting(Polarity::Hello)
        );
    }

    #[test]
    fn out_of_scope_beats_domain() {
        assert_eq!(classify("does vazeer like cooking"), Classification::OutOfScope);
    }

    #[test]
    fn out_of_scope_respects_boundaries() {
        // "art" must not fire inside "start" or "artificial".
        assert_eq!(classify("how do I start with artificial intelligence"), Classification::General);
        assert_eq!(classify("recommend some books"), Classification::OutOfScope);
    }

    #[test]
    fn domain_matches_prefixes() {
        assert_eq!(classify("list his projects"), Classification::NeedsContext);
        assert_eq!(classify("COVID-19 dashboard details"), Classification::NeedsContext);
        assert_eq!(classify("what certifications are there"), Classification::NeedsContext);
    }

    #[test]
    fn extra_keywords_from_config() {
        let c = Classifier::new(&["Rustacean".into()], &["crypto".into()]);
        assert_eq!(c.classify("is he a rustacean"), Classification::NeedsContext);
        assert_eq!(c.classify("thoughts on crypto"), Classification::OutOfScope);
    }

    #[test]
    fn only_window_is_inspected() {
        let mut msg = "x".repeat(INSPECTION_WINDOW);
        msg.push_str(" hello");
        assert_eq!(classify(&msg), Classification::General);
    }

    #[test]
    fn deterministic() {
        let c = Classifier::default();
        for msg in ["hey", "weather today?", "resume please", "what is a trait"] {
            assert_eq!(c.classify(msg), c.classify(msg));
        }
    }
}
