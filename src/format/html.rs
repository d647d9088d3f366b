//! HTML pretty-printing.
//!
//! A small event scanner splits the document into tags, text, comments and
//! declarations; tags are kept verbatim. The printer re-indents the tree
//! with one space per nesting level and then a final pass doubles every
//! run of leading whitespace, so the effective indentation is two spaces
//! per level.
//!
//! The doubling pass applies to every line, including the interior lines
//! of multi-line text nodes that keep their original leading whitespace.
//! Those lines grow again on each run, so the pass is not idempotent on
//! documents containing indented multi-line text.

use regex::Regex;

/// Elements that never have a closing tag and do not nest.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose content is raw text rather than markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

#[derive(Debug, Clone)]
enum Event {
    Start {
        name: String,
        raw: String,
        self_closing: bool,
    },
    End {
        raw: String,
    },
    Text(String),
    Comment(String),
    Decl(String),
}

/// Beautifies an HTML document.
pub fn beautify_html(content: &str) -> String {
    let events = scan(content);
    let lines = prettify(&events);
    double_indentation(&lines.join("\n"))
}

/// Doubles every run of leading whitespace, line by line.
fn double_indentation(text: &str) -> String {
    let leading = Regex::new(r"(?m)^([ \t]+)").expect("Invalid indentation pattern");
    leading.replace_all(text, "$1$1").into_owned()
}

fn scan(src: &str) -> Vec<Event> {
    let chars: Vec<char> = src.chars().collect();
    let mut events: Vec<Event> = Vec::new();
    let mut text = String::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '<' && tag_starts_at(&chars, i) {
            if !text.is_empty() {
                events.push(Event::Text(std::mem::take(&mut text)));
            }
            if chars[i..].starts_with(&['<', '!', '-', '-']) {
                let end = find_seq(&chars, i + 4, &['-', '-', '>']).unwrap_or(chars.len());
                events.push(Event::Comment(chars[i..end].iter().collect()));
                i = end;
            } else if chars.get(i + 1) == Some(&'!') {
                let end = find_tag_end(&chars, i);
                events.push(Event::Decl(chars[i..end].iter().collect()));
                i = end;
            } else if chars.get(i + 1) == Some(&'/') {
                let end = find_tag_end(&chars, i);
                events.push(Event::End {
                    raw: chars[i..end].iter().collect(),
                });
                i = end;
            } else {
                let end = find_tag_end(&chars, i);
                let raw: String = chars[i..end].iter().collect();
                let name = tag_name(&chars[i + 1..end]);
                let self_closing = raw.trim_end_matches('>').ends_with('/');
                let raw_text = !self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str());
                events.push(Event::Start {
                    name: name.clone(),
                    raw,
                    self_closing,
                });
                i = end;
                if raw_text {
                    let body_end = find_closing_tag(&chars, i, &name);
                    if body_end > i {
                        events.push(Event::Text(chars[i..body_end].iter().collect()));
                    }
                    i = body_end;
                }
            }
        } else {
            text.push(chars[i]);
            i += 1;
        }
    }
    if !text.is_empty() {
        events.push(Event::Text(text));
    }
    events
}

/// True when the `<` at `i` opens a tag, comment or declaration.
/// A stray `<` followed by anything else is plain text.
fn tag_starts_at(chars: &[char], i: usize) -> bool {
    match chars.get(i + 1) {
        Some('!') => true,
        Some('/') => chars.get(i + 2).is_some_and(|c| c.is_ascii_alphabetic()),
        Some(c) => c.is_ascii_alphabetic(),
        None => false,
    }
}

/// Finds the index just past the `>` closing the tag at `start`,
/// skipping over quoted attribute values.
fn find_tag_end(chars: &[char], start: usize) -> usize {
    let mut i = start + 1;
    let mut quote: Option<char> = None;
    while i < chars.len() {
        let c = chars[i];
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => {
                if c == '"' || c == '\'' {
                    quote = Some(c);
                } else if c == '>' {
                    return i + 1;
                }
            }
        }
        i += 1;
    }
    chars.len()
}

/// Finds the index just past `needle` starting the search at `from`.
fn find_seq(chars: &[char], from: usize, needle: &[char]) -> Option<usize> {
    let mut i = from;
    while i + needle.len() <= chars.len() {
        if chars[i..i + needle.len()] == *needle {
            return Some(i + needle.len());
        }
        i += 1;
    }
    None
}

/// Finds the start of the `</name` closing a raw-text element,
/// case-insensitively. Returns the end of input if none exists.
fn find_closing_tag(chars: &[char], from: usize, name: &str) -> usize {
    let needle: Vec<char> = format!("</{}", name).chars().collect();
    let mut i = from;
    while i + needle.len() <= chars.len() {
        if chars[i..i + needle.len()]
            .iter()
            .zip(&needle)
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
        {
            return i;
        }
        i += 1;
    }
    chars.len()
}

fn tag_name(tag_body: &[char]) -> String {
    tag_body
        .iter()
        .take_while(|c| c.is_ascii_alphanumeric() || **c == '-' || **c == ':')
        .collect::<String>()
        .to_lowercase()
}

/// Re-emits the events one per line, indented one space per nesting level.
/// Multi-line text keeps the original leading whitespace of its interior
/// lines; whitespace-only lines are dropped.
fn prettify(events: &[Event]) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut depth = 0usize;

    for event in events {
        match event {
            Event::Start {
                name,
                raw,
                self_closing,
            } => {
                lines.push(format!("{}{}", " ".repeat(depth), raw));
                if !self_closing && !VOID_ELEMENTS.contains(&name.as_str()) {
                    depth += 1;
                }
            }
            Event::End { raw } => {
                depth = depth.saturating_sub(1);
                lines.push(format!("{}{}", " ".repeat(depth), raw));
            }
            Event::Text(text) => {
                let mut first = true;
                for line in text.lines() {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let body = if first { line.trim() } else { line.trim_end() };
                    lines.push(format!("{}{}", " ".repeat(depth), body));
                    first = false;
                }
            }
            Event::Comment(raw) | Event::Decl(raw) => {
                lines.push(format!("{}{}", " ".repeat(depth), raw));
            }
        }
    }
    lines
}
