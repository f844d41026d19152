// Minimal Markdown-to-ANSI rendering for chat answers.
use colored::*;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref HEADING_RE: Regex = Regex::new(r"^(#{1,6})\s+(.*)$").unwrap();
    static ref BULLET_RE: Regex = Regex::new(r"^(\s*)[-*+]\s+(.*)$").unwrap();
    static ref NUMBERED_RE: Regex = Regex::new(r"^(\s*)(\d+)[.)]\s+(.*)$").unwrap();
    static ref INLINE_CODE_RE: Regex = Regex::new(r"`([^`]+)`").unwrap();
    static ref BOLD_RE: Regex = Regex::new(r"\*\*([^*]+)\*\*|__([^_]+)__").unwrap();
    static ref ITALIC_RE: Regex = Regex::new(r"\*([^*\s][^*]*)\*").unwrap();
    static ref RULE_RE: Regex = Regex::new(r"^\s*(?:(?:-\s*){3,}|(?:\*\s*){3,}|(?:_\s*){3,})$").unwrap();
}

pub fn render(source: &str) -> String {
    let mut out = String::new();
    let mut in_fence = false;

    for line in source.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }

        if in_fence {
            out.push_str(&format!("    {}\n", line.cyan()));
            continue;
        }

        if RULE_RE.is_match(line) {
            out.push_str(&format!("{}\n", "─".repeat(40).dimmed()));
        } else if let Some(caps) = HEADING_RE.captures(trimmed) {
            let text = inline(&caps[2]);
            out.push_str(&format!("{}\n", text.bold().bright_green()));
        } else if let Some(caps) = BULLET_RE.captures(line) {
            out.push_str(&format!("{}  • {}\n", &caps[1], inline(&caps[2])));
        } else if let Some(caps) = NUMBERED_RE.captures(line) {
            out.push_str(&format!("{}  {}. {}\n", &caps[1], &caps[2], inline(&caps[3])));
        } else if let Some(quote) = trimmed.strip_prefix('>') {
            out.push_str(&format!("  │ {}\n", inline(quote.trim_start()).italic()));
        } else {
            out.push_str(&inline(line));
            out.push('\n');
        }
    }

    out
}

fn inline(text: &str) -> String {
    // Code spans first so their contents are left alone by emphasis.
    let mut spans = Vec::new();
    let text = INLINE_CODE_RE.replace_all(text, |caps: &Captures| {
        spans.push(caps[1].cyan().to_string());
        format!("\u{0}{}\u{0}", spans.len() - 1)
    });

    let text = BOLD_RE.replace_all(&text, |caps: &Captures| {
        let inner = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str()).unwrap_or_default();
        inner.bold().to_string()
    });
    let text = ITALIC_RE.replace_all(&text, |caps: &Captures| caps[1].italic().to_string());

    let mut result = text.into_owned();
    for (i, span) in spans.iter().enumerate() {
        result = result.replace(&format!("\u{0}{}\u{0}", i), span);
    }
    result
}
