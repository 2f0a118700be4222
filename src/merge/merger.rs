//! Class conflict resolution.
//!
//! This module defines the [`ClassMerger`] trait, the seam the cache builds
//! against, and [`TailwindMerger`], the built-in implementation for
//! utility-first class names.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::config::{MergeConfig, Table};
use super::groups::Tables;
use super::values::{arbitrary_pattern, arbitrary_value, ValueKind};

/// Removes conflicting class tokens from a space-separated class string.
///
/// Implementations must keep the relative order of surviving tokens and let
/// later tokens win over earlier ones in the same group.
pub trait ClassMerger: Send + Sync + fmt::Debug {
    /// Merges a class string, returning the deduplicated result.
    fn merge(&self, classes: &str) -> String;
}

#[derive(Debug, Clone)]
struct ThemedPattern {
    prefix: String,
    values: HashSet<String>,
    group: String,
}

#[derive(Debug, Clone)]
struct ArbitraryPattern {
    prefix: String,
    kind: ValueKind,
    group: String,
}

/// Utility-class merger driven by class groups.
///
/// Each token is mapped to a class group. Walking from the last token to the
/// first, a token is dropped when a later token already claimed its group
/// under the same variant modifiers.
///
/// # Example
///
/// ```rust
/// use variations::{ClassMerger, TailwindMerger};
///
/// let merger = TailwindMerger::default();
/// assert_eq!(merger.merge("px-2 py-1 p-3"), "p-3");
/// assert_eq!(merger.merge("p-3 px-2"), "p-3 px-2");
/// assert_eq!(merger.merge("text-black text-lg text-white"), "text-lg text-white");
/// assert_eq!(merger.merge("text-wrap text-red-500"), "text-wrap text-red-500");
/// assert_eq!(
///     merger.merge("hover:bg-red-500 bg-blue-500 hover:bg-green-500"),
///     "bg-blue-500 hover:bg-green-500"
/// );
/// ```
#[derive(Clone)]
pub struct TailwindMerger {
    prefix: Option<String>,
    separator: String,
    exact: HashMap<String, String>,
    themed: Vec<ThemedPattern>,
    arbitrary: Vec<ArbitraryPattern>,
    wildcards: Vec<(String, String)>,
    conflicts: HashMap<String, Vec<String>>,
    modifier_conflicts: HashMap<String, Vec<String>>,
}

struct ParsedClass<'a> {
    modifier_id: String,
    group: &'a str,
    has_postfix: bool,
}

impl TailwindMerger {
    /// Builds a merger from the defaults layered with `config`.
    ///
    /// References that do not resolve are ignored; call
    /// [`MergeConfig::validate`] first to reject them instead.
    pub fn new(config: &MergeConfig) -> Self {
        Self::from_tables(Tables::from_config(config))
    }

    fn from_tables(tables: Tables) -> Self {
        let mut exact = HashMap::new();
        let mut themed = Vec::new();
        let mut arbitrary = Vec::new();
        let mut wildcards = Vec::new();

        for (group, patterns) in &tables.class_groups {
            for pattern in patterns.iter().filter(|p| !p.is_empty()) {
                if let Some((prefix, key)) = pattern.split_once('$') {
                    if let Some(values) = tables.theme.get(key) {
                        themed.push(ThemedPattern {
                            prefix: prefix.to_string(),
                            values: values.iter().cloned().collect(),
                            group: group.clone(),
                        });
                    }
                } else if let Some((prefix, kind)) = arbitrary_pattern(pattern) {
                    if let Some(kind) = ValueKind::from_name(kind) {
                        arbitrary.push(ArbitraryPattern {
                            prefix: prefix.to_string(),
                            kind,
                            group: group.clone(),
                        });
                    }
                } else if let Some(prefix) = pattern.strip_suffix('*') {
                    wildcards.push((prefix.to_string(), group.clone()));
                } else {
                    exact
                        .entry(pattern.clone())
                        .or_insert_with(|| group.clone());
                }
            }
        }

        // Longest prefix first so `inset-x-*` beats `inset-*`.
        themed.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        arbitrary.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        wildcards.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let known = |id: &str| tables.class_groups.contains_key(id);
        let resolve_rules = |table: &Table| -> HashMap<String, Vec<String>> {
            table
                .iter()
                .filter(|(from, _)| known(from.as_str()))
                .map(|(from, targets)| {
                    let targets = targets
                        .iter()
                        .filter(|t| known(t.as_str()))
                        .cloned()
                        .collect();
                    (from.clone(), targets)
                })
                .collect()
        };

        Self {
            conflicts: resolve_rules(&tables.conflicting_class_groups),
            modifier_conflicts: resolve_rules(&tables.conflicting_class_group_modifiers),
            prefix: tables.prefix,
            separator: tables.separator,
            exact,
            themed,
            arbitrary,
            wildcards,
        }
    }

    /// Returns the class group a base class (no modifiers) belongs to.
    pub fn class_group(&self, class: &str) -> Option<&str> {
        if let Some(group) = self.exact.get(class) {
            return Some(group);
        }

        let themed = self.themed.iter().find(|pattern| {
            class
                .strip_prefix(pattern.prefix.as_str())
                .is_some_and(|value| pattern.values.contains(value))
        });
        if let Some(pattern) = themed {
            return Some(&pattern.group);
        }

        let arbitrary = self.arbitrary.iter().find(|pattern| {
            class
                .strip_prefix(pattern.prefix.as_str())
                .and_then(arbitrary_value)
                .is_some_and(|value| pattern.kind.accepts(value))
        });
        if let Some(pattern) = arbitrary {
            return Some(&pattern.group);
        }

        self.wildcards
            .iter()
            .find(|(prefix, _)| {
                class
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|value| !value.is_empty())
            })
            .map(|(_, group)| group.as_str())
    }

    fn parse<'a>(&'a self, token: &str) -> Option<ParsedClass<'a>> {
        let separator = self.separator.as_str();
        let mut modifiers: Vec<&str> = Vec::new();
        let mut depth = 0usize;
        let mut start = 0usize;
        let mut postfix: Option<usize> = None;
        let mut skip_until = 0usize;

        for (i, c) in token.char_indices() {
            if i < skip_until {
                continue;
            }
            if depth == 0 {
                if token[i..].starts_with(separator) {
                    modifiers.push(&token[start..i]);
                    start = i + separator.len();
                    skip_until = start;
                    continue;
                }
                if c == '/' {
                    postfix = Some(i);
                }
            }
            match c {
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }

        let mut base_start = start;
        let mut base_end = token.len();
        let mut important = false;
        if token[base_start..].starts_with('!') {
            important = true;
            base_start += 1;
        } else if token[base_start..].ends_with('!') && base_end > base_start + 1 {
            important = true;
            base_end -= 1;
        }

        if let Some(prefix) = &self.prefix {
            if !token[base_start..base_end].starts_with(prefix.as_str()) {
                return None;
            }
            base_start += prefix.len();
        }

        let postfix = postfix.filter(|&pos| pos > base_start && pos < base_end);
        let base = &token[base_start..base_end];

        let (group, has_postfix) = match postfix {
            Some(pos) => match self.class_group(&token[base_start..pos]) {
                Some(group) => (group, true),
                None => (self.class_group(base)?, false),
            },
            None => (self.class_group(base)?, false),
        };

        let mut modifier_id = sort_modifiers(&modifiers).join(":");
        if important {
            modifier_id.push('!');
        }

        Some(ParsedClass {
            modifier_id,
            group,
            has_postfix,
        })
    }
}

/// Sorts variant modifiers; arbitrary modifiers (`[...]`) keep their position.
fn sort_modifiers<'a>(modifiers: &[&'a str]) -> Vec<&'a str> {
    let mut sorted = Vec::with_capacity(modifiers.len());
    let mut run: Vec<&str> = Vec::new();
    for &modifier in modifiers {
        if modifier.starts_with('[') {
            run.sort_unstable();
            sorted.append(&mut run);
            sorted.push(modifier);
        } else {
            run.push(modifier);
        }
    }
    run.sort_unstable();
    sorted.append(&mut run);
    sorted
}

impl ClassMerger for TailwindMerger {
    fn merge(&self, classes: &str) -> String {
        let mut claimed: HashSet<(String, &str)> = HashSet::new();
        let mut kept: Vec<&str> = Vec::new();

        for token in classes.split_whitespace().rev() {
            let Some(parsed) = self.parse(token) else {
                kept.push(token);
                continue;
            };

            if !claimed.insert((parsed.modifier_id.clone(), parsed.group)) {
                continue;
            }

            for group in self.conflicts.get(parsed.group).into_iter().flatten() {
                claimed.insert((parsed.modifier_id.clone(), group.as_str()));
            }
            if parsed.has_postfix {
                for group in self.modifier_conflicts.get(parsed.group).into_iter().flatten() {
                    claimed.insert((parsed.modifier_id.clone(), group.as_str()));
                }
            }

            kept.push(token);
        }

        kept.reverse();
        kept.join(" ")
    }
}

impl Default for TailwindMerger {
    fn default() -> Self {
        Self::from_tables(Tables::defaults())
    }
}

impl fmt::Debug for TailwindMerger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let patterns =
            self.exact.len() + self.themed.len() + self.arbitrary.len() + self.wildcards.len();
        f.debug_struct("TailwindMerger")
            .field("prefix", &self.prefix)
            .field("separator", &self.separator)
            .field("patterns", &patterns)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merge(classes: &str) -> String {
        TailwindMerger::default().merge(classes)
    }

    #[test]
    fn test_later_token_wins() {
        assert_eq!(merge("p-2 p-4"), "p-4");
        assert_eq!(merge("bg-red-500 bg-blue-500"), "bg-blue-500");
    }

    #[test]
    fn test_keeps_relative_order() {
        assert_eq!(merge("px-4 py-2 px-6 font-bold"), "py-2 px-6 font-bold");
    }

    #[test]
    fn test_unrelated_groups_survive() {
        let classes = "px-4 py-2 font-bold transition-all bg-gray-500 text-black text-lg w-full";
        assert_eq!(merge(classes), classes);
    }

    #[test]
    fn test_font_size_and_text_color_are_distinct() {
        assert_eq!(merge("text-sm text-lg"), "text-lg");
        assert_eq!(merge("text-white text-black"), "text-black");
        assert_eq!(merge("text-white text-lg"), "text-white text-lg");
        assert_eq!(merge("text-left text-center text-red-500"), "text-center text-red-500");
    }

    #[test]
    fn test_conflicting_groups() {
        assert_eq!(merge("px-2 pt-1 p-4"), "p-4");
        assert_eq!(merge("p-4 px-2"), "p-4 px-2");
        assert_eq!(merge("w-4 h-4 size-8"), "size-8");
        assert_eq!(merge("rounded-t-lg rounded"), "rounded");
    }

    #[test]
    fn test_modifiers_scope_conflicts() {
        assert_eq!(merge("hover:p-2 p-4"), "hover:p-2 p-4");
        assert_eq!(merge("hover:p-2 hover:p-4"), "hover:p-4");
        assert_eq!(merge("hover:focus:p-2 focus:hover:p-4"), "focus:hover:p-4");
        assert_eq!(merge("md:hover:bg-red-500 hover:md:bg-blue-500"), "hover:md:bg-blue-500");
    }

    #[test]
    fn test_important_is_separate() {
        assert_eq!(merge("!p-2 p-4"), "!p-2 p-4");
        assert_eq!(merge("!p-2 !p-4"), "!p-4");
        assert_eq!(merge("p-2! p-4!"), "p-4!");
    }

    #[test]
    fn test_arbitrary_values() {
        assert_eq!(merge("p-2 p-[3px]"), "p-[3px]");
        assert_eq!(merge("[&>*]:p-2 [&>*]:p-4"), "[&>*]:p-4");
        assert_eq!(merge("bg-[#fff] bg-red-500"), "bg-red-500");
        assert_eq!(merge("bg-[url(a:b)] bg-red-500"), "bg-[url(a:b)] bg-red-500");
        assert_eq!(merge("bg-[url(a.png)] bg-none"), "bg-none");
        assert_eq!(merge("text-[#333] text-red-500"), "text-red-500");
        assert_eq!(merge("text-[14px] text-lg"), "text-lg");
        assert_eq!(merge("border-[3px] border-2"), "border-2");
        assert_eq!(merge("font-[600] font-bold"), "font-bold");
        assert_eq!(merge("text-[var(--x)] text-red-500"), "text-[var(--x)] text-red-500");
    }

    #[test]
    fn test_color_groups_only_take_colors() {
        assert_eq!(merge("bg-gradient-to-r bg-red-500"), "bg-gradient-to-r bg-red-500");
        assert_eq!(merge("bg-none bg-red-500"), "bg-none bg-red-500");
        assert_eq!(merge("text-wrap text-red-500"), "text-wrap text-red-500");
        assert_eq!(merge("text-balance text-red-500"), "text-balance text-red-500");
        assert_eq!(merge("text-[14px] text-red-500"), "text-[14px] text-red-500");
        assert_eq!(merge("bg-center bg-cover bg-red-500"), "bg-center bg-cover bg-red-500");
        assert_eq!(merge("border-solid border-red-500"), "border-solid border-red-500");
        assert_eq!(
            merge("ring-2 ring-offset-2 ring-blue-500"),
            "ring-2 ring-offset-2 ring-blue-500"
        );
    }

    #[test]
    fn test_non_color_groups_merge() {
        assert_eq!(merge("text-wrap text-balance"), "text-balance");
        assert_eq!(merge("bg-none bg-gradient-to-r"), "bg-gradient-to-r");
        assert_eq!(merge("from-red-500 from-blue-500 to-white"), "from-blue-500 to-white");
    }

    #[test]
    fn test_layout_families() {
        assert_eq!(merge("grid-cols-2 grid-cols-3"), "grid-cols-3");
        assert_eq!(merge("col-span-2 col-span-3"), "col-span-3");
        assert_eq!(merge("col-auto col-span-full"), "col-span-full");
        assert_eq!(merge("order-1 order-2"), "order-2");
        assert_eq!(merge("self-start self-end"), "self-end");
        assert_eq!(merge("content-start content-center"), "content-center");
        assert_eq!(merge("object-cover object-contain"), "object-contain");
        assert_eq!(merge("basis-1/2 grow flex-1"), "flex-1");
        assert_eq!(merge("line-clamp-2 line-clamp-3"), "line-clamp-3");
    }

    #[test]
    fn test_outline_and_border_parts() {
        assert_eq!(merge("outline-2 outline-4"), "outline-4");
        assert_eq!(merge("outline-dashed outline-none"), "outline-none");
        // style and width are separate properties
        assert_eq!(merge("outline-none outline-2"), "outline-none outline-2");
        assert_eq!(merge("outline-red-500 outline-blue-500"), "outline-blue-500");
        assert_eq!(merge("border-solid border-dashed"), "border-dashed");
        assert_eq!(merge("decoration-wavy decoration-dotted"), "decoration-dotted");
        assert_eq!(merge("decoration-2 decoration-red-500"), "decoration-2 decoration-red-500");
    }

    #[test]
    fn test_postfix_modifier() {
        assert_eq!(merge("bg-red-500/50 bg-blue-500"), "bg-blue-500");
        assert_eq!(merge("leading-7 text-lg/6"), "text-lg/6");
        assert_eq!(merge("leading-7 text-lg"), "leading-7 text-lg");
        assert_eq!(merge("w-1/2 w-full"), "w-full");
    }

    #[test]
    fn test_unknown_tokens_kept() {
        assert_eq!(merge("card p-2 card"), "card p-2 card");
        assert_eq!(merge(""), "");
    }

    #[test]
    fn test_class_group_lookup() {
        let merger = TailwindMerger::default();
        assert_eq!(merger.class_group("inset-x-4"), Some("inset-x"));
        assert_eq!(merger.class_group("inset-4"), Some("inset"));
        assert_eq!(merger.class_group("border"), Some("border-w"));
        assert_eq!(merger.class_group("border-2"), Some("border-w"));
        assert_eq!(merger.class_group("border-red-500"), Some("border-color"));
        assert_eq!(merger.class_group("shadow-lg"), Some("shadow"));
        assert_eq!(merger.class_group("shadow-red-500"), Some("shadow-color"));
        assert_eq!(merger.class_group("text-wrap"), Some("text-wrap"));
        assert_eq!(merger.class_group("text-[14px]"), Some("font-size"));
        assert_eq!(merger.class_group("text-[#fff]"), Some("text-color"));
        assert_eq!(merger.class_group("bg-[url(a.png)]"), Some("bg-image"));
        assert_eq!(merger.class_group("text-fancy"), None);
        assert_eq!(merger.class_group("p-"), None);
        assert_eq!(merger.class_group("nonsense"), None);
    }

    #[test]
    fn test_custom_class_group() {
        let config = MergeConfig::new()
            .class_group("glow", ["glow", "glow-*"])
            .conflicting_class_groups("glow", ["shadow"]);
        let merger = TailwindMerger::new(&config);
        assert_eq!(merger.merge("glow-sm glow-lg"), "glow-lg");
        assert_eq!(merger.merge("shadow-md glow"), "glow");
    }

    #[test]
    fn test_theme_extension() {
        let config = MergeConfig::new().extend_theme("fontSize", ["huge"]);
        let merger = TailwindMerger::new(&config);
        assert_eq!(merger.merge("text-red-500 text-huge"), "text-red-500 text-huge");
        assert_eq!(merger.merge("text-lg text-huge"), "text-huge");
    }

    #[test]
    fn test_prefix() {
        let merger = TailwindMerger::new(&MergeConfig::new().prefix("tw-"));
        assert_eq!(merger.merge("tw-p-2 tw-p-4"), "tw-p-4");
        assert_eq!(merger.merge("p-2 p-4"), "p-2 p-4");
        assert_eq!(merger.merge("hover:tw-p-2 hover:tw-p-4"), "hover:tw-p-4");
    }

    #[test]
    fn test_custom_separator() {
        let merger = TailwindMerger::new(&MergeConfig::new().separator("_"));
        assert_eq!(merger.merge("hover_p-2 hover_p-4"), "hover_p-4");
        assert_eq!(merger.merge("hover_p-2 p-4"), "hover_p-2 p-4");
    }

    #[test]
    fn test_sort_modifiers_respects_arbitrary_barriers() {
        assert_eq!(
            sort_modifiers(&["md", "hover", "[&>*]", "focus", "dark"]),
            vec!["hover", "md", "[&>*]", "dark", "focus"]
        );
    }
}
