//! In-memory document: lines, headings with anchor ids, and inline links.
//!
//! The format is a small markdown subset.  `#`-prefixed lines are headings
//! (up to six levels), an optional trailing `{#id}` sets the anchor id
//! explicitly, and `[label](href)` spans anywhere in a line are links.
//! Headings inside ``` fences are plain text.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;

const SAMPLE: &str = include_str!("sample.md");

// ───────────────────────────────────────── model ─────────────

/// An inline `[label](href)` span.  Columns are char indices into the raw
/// line, `end` exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub start: usize,
    pub end: usize,
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading { level: u8, section: usize },
    Code,
    Text,
}

#[derive(Debug, Clone)]
pub struct Line {
    pub text: String,
    pub kind: LineKind,
    pub links: Vec<Link>,
}

impl Line {
    /// The link covering char index `col`, if any.
    pub fn link_at(&self, col: usize) -> Option<&Link> {
        self.links.iter().find(|l| (l.start..l.end).contains(&col))
    }
}

/// A heading and where it sits in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub level: u8,
    pub line: usize,
}

#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    lines: Vec<Line>,
    sections: Vec<Section>,
}

impl Document {
    /// Parse document text.  Never fails; unrecognised syntax is plain text.
    pub fn parse(title: impl Into<String>, text: &str) -> Self {
        let mut lines = Vec::new();
        let mut sections = Vec::new();
        let mut used_ids = HashSet::new();
        let mut in_fence = false;

        for raw in text.lines() {
            let raw = raw.trim_end();
            if raw.trim_start().starts_with("```") {
                in_fence = !in_fence;
                lines.push(Line {
                    text: raw.to_string(),
                    kind: LineKind::Code,
                    links: Vec::new(),
                });
                continue;
            }
            if in_fence {
                lines.push(Line {
                    text: raw.to_string(),
                    kind: LineKind::Code,
                    links: Vec::new(),
                });
                continue;
            }

            if let Some((level, title, explicit_id)) = parse_heading(raw) {
                let base = explicit_id.unwrap_or_else(|| slugify(&title));
                let id = unique_id(&base, &mut used_ids);
                let section = sections.len();
                sections.push(Section {
                    id,
                    title: title.clone(),
                    level,
                    line: lines.len(),
                });
                lines.push(Line {
                    links: parse_links(&title),
                    text: title,
                    kind: LineKind::Heading { level, section },
                });
                continue;
            }

            lines.push(Line {
                text: raw.to_string(),
                kind: LineKind::Text,
                links: parse_links(raw),
            });
        }

        Self {
            title: title.into(),
            lines,
            sections,
        }
    }

    /// Read and parse a document from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading document {}", path.display()))?;
        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::parse(title, &text))
    }

    /// The built-in demo document.
    pub fn sample() -> Self {
        Self::parse("anchor-scroll guide", SAMPLE)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, idx: usize) -> Option<&Section> {
        self.sections.get(idx)
    }

    pub fn section_by_id(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// The section containing `line` (the last heading at or above it).
    pub fn section_at(&self, line: usize) -> Option<usize> {
        self.sections.iter().rposition(|s| s.line <= line)
    }
}

// ───────────────────────────────────────── parsing ───────────

/// `## Title {#id}` → `(2, "Title", Some("id"))`.
fn parse_heading(line: &str) -> Option<(u8, String, Option<String>)> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    let mut title = rest.trim();
    let mut explicit_id = None;
    if let Some(open) = title.rfind("{#") {
        if title.ends_with('}') {
            let id = title[open + 2..title.len() - 1].trim();
            if !id.is_empty() {
                explicit_id = Some(id.to_string());
            }
            title = title[..open].trim_end();
        }
    }
    Some((hashes as u8, title.to_string(), explicit_id))
}

/// Find every `[label](href)` span in `line`.
fn parse_links(line: &str) -> Vec<Link> {
    let chars: Vec<char> = line.chars().collect();
    let mut links = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '[' {
            i += 1;
            continue;
        }
        let Some(close) = find_from(&chars, i + 1, ']') else {
            break;
        };
        if chars.get(close + 1) != Some(&'(') {
            i += 1;
            continue;
        }
        let Some(paren) = find_from(&chars, close + 2, ')') else {
            break;
        };
        links.push(Link {
            start: i,
            end: paren + 1,
            label: chars[i + 1..close].iter().collect(),
            href: chars[close + 2..paren].iter().collect::<String>().trim().to_string(),
        });
        i = paren + 1;
    }

    links
}

fn find_from(chars: &[char], from: usize, wanted: char) -> Option<usize> {
    chars
        .get(from..)?
        .iter()
        .position(|c| *c == wanted)
        .map(|p| p + from)
}

/// Lower-case, alphanumerics kept, whitespace and `-`/`_` collapse to `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if (c.is_whitespace() || c == '-' || c == '_') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug.to_string()
    }
}

fn unique_id(base: &str, used: &mut HashSet<String>) -> String {
    let mut candidate = base.to_string();
    let mut n = 1;
    while used.contains(&candidate) {
        candidate = format!("{base}-{n}");
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}
