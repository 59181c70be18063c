//! Plain-text sanitization of model output.
//!
//! The web client renders answers verbatim, so markdown artifacts are
//! removed, list markers are normalized to `- ` and probable code lines are
//! given a fixed four-space indent. `sanitize` is total and idempotent.

use regex_lite::Regex;
use std::sync::LazyLock;

const CODE_INDENT: &str = "    ";

static FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z0-9_+#.-]*[ \t]*\r?\n").expect("valid regex"));
static FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```").expect("valid regex"));

const MARKUP: [char; 4] = ['*', '_', '#', '`'];

/// Substrings that mark a line as source code wherever they appear.
const CODE_TOKENS: &[&str] = &[
    "def ", "if ", "else:", "for ", "while ", "import ", "return ", "console.log", "printf", "{",
    "}", ";", "(", ")",
];

/// A signal that a line is code. Evaluated in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeSignal {
    AlreadyIndented,
    Token,
}

const RULES: &[CodeSignal] = &[CodeSignal::AlreadyIndented, CodeSignal::Token];

impl CodeSignal {
    fn matches(self, indented: bool, body: &str) -> bool {
        match self {
            CodeSignal::AlreadyIndented => indented,
            CodeSignal::Token => CODE_TOKENS.iter().any(|t| body.contains(t)),
        }
    }
}

fn code_signal(indented: bool, body: &str) -> Option<CodeSignal> {
    RULES.iter().copied().find(|rule| rule.matches(indented, body))
}

/// Text after a leading `-`, `+` or `<number>.` marker and its whitespace.
fn list_item(body: &str) -> Option<&str> {
    let after = match body.strip_prefix(['-', '+']) {
        Some(rest) => rest,
        None => {
            let digits = body.len() - body.trim_start_matches(|c: char| c.is_ascii_digit()).len();
            if digits == 0 {
                return None;
            }
            body[digits..].strip_prefix('.')?
        }
    };
    after.starts_with(char::is_whitespace).then(|| after.trim_start())
}

/// One output line, or `None` for a blank line.
fn clean_line(line: &str) -> Option<String> {
    let rest = line.trim_start();
    let indented = rest.len() < line.len();

    // Heading marks go with their spacing; the line's own indent stays.
    let rest = match rest.strip_prefix('#') {
        Some(_) => rest.trim_start_matches('#').trim_start(),
        None => rest,
    };
    let rest = match rest.strip_prefix('*') {
        Some(after) if after.starts_with(char::is_whitespace) => format!("- {after}"),
        _ => rest.to_string(),
    };

    let stripped: String = rest.chars().filter(|c| !MARKUP.contains(c)).collect();
    let body = stripped.trim();
    if body.is_empty() {
        return None;
    }

    Some(if let Some(item) = list_item(body) {
        format!("- {item}")
    } else if code_signal(indented, body).is_some() {
        format!("{CODE_INDENT}{body}")
    } else {
        body.to_string()
    })
}

/// Strip markup, normalize lists, re-indent code, collapse blank runs.
pub fn sanitize(raw: &str) -> String {
    let text = FENCE_OPEN.replace_all(raw, "");
    let text = FENCE.replace_all(&text, "");

    let mut out: Vec<String> = Vec::new();
    let mut previous_blank = false;
    for line in text.split('\n') {
        match clean_line(line) {
            Some(cleaned) => {
                out.push(cleaned);
                previous_blank = false;
            }
            None => {
                if !previous_blank {
                    out.push(String::new());
                }
                previous_blank = true;
            }
        }
    }

    // Leading blank lines are dropped; the first line keeps its indent.
    let first = out.iter().position(|l| !l.is_empty()).unwrap_or(out.len());
    out[first..].join("\n").trim_end().to_string()
}
