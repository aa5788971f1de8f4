use fancy_regex::Regex as FancyRegex;
use log::debug;
use regex::Regex;

use crate::errors::Result;

/// How the pattern of a substitution is interpreted.
///
/// Patterns are regular expressions unless `Fixed` is requested, so metacharacters such as
/// `.`, `*` and `(` are active: substituting `.` replaces every character, not a literal dot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchMode {
    #[default]
    Regex,
    /// Regex with look-around and backreferences, at the cost of performance
    AdvancedRegex,
    Fixed,
}

impl SearchMode {
    pub fn from_flags(fixed_strings: bool, advanced_regex: bool) -> Self {
        if fixed_strings {
            SearchMode::Fixed
        } else if advanced_regex {
            SearchMode::AdvancedRegex
        } else {
            SearchMode::Regex
        }
    }
}

#[derive(Clone, Debug)]
pub enum SearchType {
    Pattern(Regex),
    PatternAdvanced(FancyRegex),
    Fixed(String),
}

impl SearchType {
    pub fn parse(pattern: &str, mode: SearchMode) -> Result<Self> {
        let search = match mode {
            SearchMode::Regex => SearchType::Pattern(Regex::new(pattern)?),
            SearchMode::AdvancedRegex => SearchType::PatternAdvanced(FancyRegex::new(pattern)?),
            SearchMode::Fixed => SearchType::Fixed(pattern.to_owned()),
        };
        Ok(search)
    }

    pub fn as_str(&self) -> &str {
        match self {
            SearchType::Pattern(r) => r.as_str(),
            SearchType::PatternAdvanced(r) => r.as_str(),
            SearchType::Fixed(s) => s,
        }
    }

    /// Rewrite `replacement` so that only references to groups this pattern defines are
    /// expanded; any other `$` reference is kept as literal text
    fn expansion_for(&self, replacement: &str) -> String {
        match self {
            SearchType::Fixed(_) => replacement.to_owned(),
            SearchType::Pattern(r) => {
                let names: Vec<&str> = r.capture_names().flatten().collect();
                escape_missing_groups(replacement, r.captures_len(), &names)
            }
            SearchType::PatternAdvanced(r) => {
                let names: Vec<&str> = r.capture_names().flatten().collect();
                escape_missing_groups(replacement, r.captures_len(), &names)
            }
        }
    }
}

/// Escape every `$name`, `$N` or `${name}` in `replacement` that does not refer to one of the
/// given groups. Group 0 (the whole match) always exists.
fn escape_missing_groups(replacement: &str, captures_len: usize, names: &[&str]) -> String {
    let mut escaped = String::with_capacity(replacement.len());
    let mut rest = replacement;

    while let Some(pos) = rest.find('$') {
        escaped.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(stripped) = after.strip_prefix('$') {
            escaped.push_str("$$");
            rest = stripped;
            continue;
        }

        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };

        let group_exists = !name.is_empty()
            && match name.parse::<usize>() {
                Ok(index) => index < captures_len,
                Err(_) => names.contains(&name),
            };
        escaped.push_str(if group_exists { "$" } else { "$$" });
        escaped.push_str(&after[..consumed]);
        rest = &after[consumed..];
    }

    escaped.push_str(rest);
    escaped
}

/// A compiled pattern together with its replacement text.
///
/// Matches are global and case-sensitive, and every non-overlapping match is replaced from left
/// to right. In the regex modes the replacement may refer to capture groups (`$1`, `${name}`);
/// write `$$` for a literal dollar sign. A `$` reference to a group the pattern does not define
/// is kept literally. In `Fixed` mode the replacement is inserted as-is.
#[derive(Clone, Debug)]
pub struct Substitution {
    search: SearchType,
    replacement: String,
    /// `replacement` with references to undefined groups escaped
    expansion: String,
}

impl Substitution {
    pub fn new(pattern: &str, replacement: &str, mode: SearchMode) -> Result<Self> {
        let search = SearchType::parse(pattern, mode)?;
        let expansion = search.expansion_for(replacement);
        Ok(Self {
            search,
            replacement: replacement.to_owned(),
            expansion,
        })
    }

    pub fn search(&self) -> &SearchType {
        &self.search
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn apply(&self, text: &str) -> Result<String> {
        let replaced = match &self.search {
            SearchType::Fixed(fixed_str) => text.replace(fixed_str.as_str(), &self.replacement),
            SearchType::Pattern(pattern) => {
                pattern.replace_all(text, self.expansion.as_str()).into_owned()
            }
            SearchType::PatternAdvanced(pattern) => pattern
                .try_replacen(text, 0, self.expansion.as_str())?
                .into_owned(),
        };
        Ok(replaced)
    }

    pub fn count_matches(&self, text: &str) -> usize {
        match &self.search {
            SearchType::Fixed(fixed_str) => text.matches(fixed_str.as_str()).count(),
            SearchType::Pattern(pattern) => pattern.find_iter(text).count(),
            SearchType::PatternAdvanced(pattern) => {
                pattern.find_iter(text).filter(|m| m.is_ok()).count()
            }
        }
    }
}

/// Replace every match of `pattern` (a regular expression) in `text` with `replacement`
pub fn substitute(text: &str, pattern: &str, replacement: &str) -> Result<String> {
    debug!("Substituting {pattern:?} with {replacement:?}");
    Substitution::new(pattern, replacement, SearchMode::Regex)?.apply(text)
}
