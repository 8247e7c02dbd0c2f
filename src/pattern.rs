use crate::error::InsertError;
use crate::params::Params;

use regex::Regex;
use std::iter::Peekable;
use std::mem;
use std::str::Chars;

// What a bare parameter accepts: a non-empty run of non-'/' characters.
const DEFAULT_CAPTURE: &str = "[^/]+?";

/// A parameter descriptor extracted from a single route segment.
///
/// The segment `ab-:id(\d+)?` produces one key named `id` with prefix `ab-`
/// and `optional` set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Key {
    /// The parameter name.
    pub name: String,
    /// Whether the parameter carried a trailing `?`.
    pub optional: bool,
    /// Literal text preceding the parameter within its segment.
    pub prefix: String,
    /// Whether the parameter carried a repetition modifier. Repetition is
    /// rejected at compile time, so this is always `false` on a key obtained
    /// from a successfully compiled segment.
    pub repeat: bool,
}

/// A compiled matcher for a single path segment.
///
/// Parameters compile to plain numbered capture groups, so the regex source
/// never contains parameter names. Two segments are considered the same
/// pattern (for trie sharing and duplicate detection) iff their sources are
/// textually identical.
#[derive(Clone, Debug)]
pub struct SegmentPattern {
    source: String,
    regex: Regex,
    keys: Vec<Key>,
    // Capture group index for each key. Custom capture regexes may contain
    // their own groups, shifting the indices of later keys.
    indices: Vec<usize>,
}

impl PartialEq for SegmentPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for SegmentPattern {}

impl SegmentPattern {
    /// Compiles one path segment, the substring between two `/` characters.
    pub(crate) fn compile(segment: &str) -> Result<SegmentPattern, InsertError> {
        let mut source = String::from("^");
        let mut keys = Vec::new();
        let mut indices = Vec::new();
        let mut literal = String::new();
        let mut next_group = 1;

        let mut chars = segment.chars().peekable();
        while let Some(c) = chars.next() {
            if c != ':' {
                literal.push(c);
                continue;
            }

            let mut name = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_alphanumeric() || c == '_' {
                    name.push(c);
                    chars.next();
                } else {
                    break;
                }
            }

            // A bare ':' with no name is ordinary literal text.
            if name.is_empty() {
                literal.push(':');
                continue;
            }

            let custom = if chars.peek() == Some(&'(') {
                chars.next();
                match scan_group(&mut chars) {
                    Some(group) => Some(group),
                    None => {
                        return Err(InsertError::InvalidPattern {
                            segment: segment.to_owned(),
                        })
                    }
                }
            } else {
                None
            };

            let optional = chars.peek() == Some(&'?');
            if optional {
                chars.next();
            }

            if matches!(chars.peek(), Some(&'+') | Some(&'*')) {
                return Err(InsertError::RepeatModifier { param: name });
            }

            let capture = custom.as_deref().unwrap_or(DEFAULT_CAPTURE);
            let prefix = mem::take(&mut literal);

            if optional {
                source.push_str("(?:");
                source.push_str(&regex::escape(&prefix));
                source.push('(');
                source.push_str(capture);
                source.push_str("))?");
            } else {
                source.push_str(&regex::escape(&prefix));
                source.push('(');
                source.push_str(capture);
                source.push(')');
            }

            indices.push(next_group);
            next_group += 1 + count_captures(capture);
            keys.push(Key {
                name,
                optional,
                prefix,
                repeat: false,
            });
        }

        source.push_str(&regex::escape(&literal));
        source.push('$');

        let regex = Regex::new(&source).map_err(|_| InsertError::InvalidPattern {
            segment: segment.to_owned(),
        })?;

        Ok(SegmentPattern {
            source,
            regex,
            keys,
            indices,
        })
    }

    /// The underlying regex source. Textual identity of sources is the
    /// pattern equality used throughout the tree.
    pub(crate) fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Whether the whole component matches this segment.
    pub(crate) fn matches(&self, component: &str) -> bool {
        self.regex.is_match(component)
    }

    /// Pushes the values captured from `component` into `params`. Optional
    /// parameters that did not participate in the match are left unbound.
    pub(crate) fn bind<'s, 'p>(&'s self, component: &'p str, params: &mut Params<'s, 'p>) {
        if let Some(caps) = self.regex.captures(component) {
            for (key, &index) in self.keys.iter().zip(&self.indices) {
                if let Some(m) = caps.get(index) {
                    params.push(&key.name, m.as_str());
                }
            }
        }
    }
}

/// One compiled segment of a route, paired with the raw text it was declared
/// with.
#[derive(Clone, Debug)]
pub(crate) struct Segment {
    pub(crate) raw: String,
    pub(crate) pattern: SegmentPattern,
}

/// Splits a route into its non-empty segments and compiles each of them.
pub(crate) fn compile_route(route: &str) -> Result<Vec<Segment>, InsertError> {
    route
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|raw| {
            Ok(Segment {
                raw: raw.to_owned(),
                pattern: SegmentPattern::compile(raw)?,
            })
        })
        .collect()
}

// Consumes a custom capture group up to its closing parenthesis, honoring
// nested groups and backslash escapes. Returns `None` if the group is never
// closed.
fn scan_group(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let mut group = String::new();
    let mut depth = 1usize;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                group.push(c);
                // the escaped character is verbatim and cannot affect depth
                if let Some(escaped) = chars.next() {
                    group.push(escaped);
                }
                continue;
            }
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(group);
                }
            }
            _ => {}
        }
        group.push(c);
    }

    None
}

// Counts capturing groups inside a custom capture regex: every unescaped '('
// not immediately followed by '?'.
fn count_captures(capture: &str) -> usize {
    let mut count = 0;
    let mut chars = capture.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '(' => {
                if chars.peek() != Some(&'?') {
                    count += 1;
                }
            }
            _ => {}
        }
    }
    count
}
