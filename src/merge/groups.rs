//! Default class groups and the effective lookup tables.
//!
//! The defaults cover the utilities components reach for most often. Anything
//! missing can be added through [`MergeConfig`](super::MergeConfig).
//!
//! Patterns come in four shapes: an exact class (`flex`), a theme lookup
//! (`text-$fontSize`), an arbitrary value of one kind (`text-[length]`) and a
//! wildcard (`p-*`). Color utilities only use the first three, so `text-wrap`
//! or `bg-none` never read as a color.

use super::config::{MergeConfig, Table};
use super::error::MergeConfigError;
use super::values::{arbitrary_pattern, ValueKind};

type Entries = &'static [(&'static str, &'static [&'static str])];

const DEFAULT_THEME: Entries = &[
    (
        "fontSize",
        &[
            "xs", "sm", "base", "lg", "xl", "2xl", "3xl", "4xl", "5xl", "6xl", "7xl", "8xl", "9xl",
        ],
    ),
    (
        "fontWeight",
        &[
            "thin",
            "extralight",
            "light",
            "normal",
            "medium",
            "semibold",
            "bold",
            "extrabold",
            "black",
        ],
    ),
    ("borderWidth", &["0", "2", "4", "8"]),
    ("ringWidth", &["0", "1", "2", "4", "8", "inset"]),
    ("radius", &["none", "sm", "md", "lg", "xl", "2xl", "3xl", "full"]),
    ("shadow", &["sm", "md", "lg", "xl", "2xl", "inner", "none"]),
    ("outlineWidth", &["0", "1", "2", "4", "8"]),
    ("decorationThickness", &["auto", "from-font", "0", "1", "2", "4", "8"]),
];

const COLOR_FAMILIES: &[&str] = &[
    "slate", "gray", "zinc", "neutral", "stone", "red", "orange", "amber", "yellow", "lime",
    "green", "emerald", "teal", "cyan", "sky", "blue", "indigo", "violet", "purple", "fuchsia",
    "pink", "rose",
];

const COLOR_SHADES: &[&str] = &[
    "50", "100", "200", "300", "400", "500", "600", "700", "800", "900", "950",
];

const PLAIN_COLORS: &[&str] = &["inherit", "current", "transparent", "black", "white"];

/// The `colors` theme: plain colors plus every family and shade pair.
fn color_values() -> Vec<String> {
    let shaded = COLOR_FAMILIES.iter().flat_map(|family| {
        COLOR_SHADES
            .iter()
            .map(move |shade| format!("{}-{}", family, shade))
    });
    PLAIN_COLORS
        .iter()
        .map(|c| c.to_string())
        .chain(shaded)
        .collect()
}

const DEFAULT_CLASS_GROUPS: Entries = &[
    (
        "display",
        &[
            "block",
            "inline-block",
            "inline",
            "flex",
            "inline-flex",
            "grid",
            "inline-grid",
            "table",
            "contents",
            "flow-root",
            "list-item",
            "hidden",
        ],
    ),
    ("position", &["static", "fixed", "absolute", "relative", "sticky"]),
    ("visibility", &["visible", "invisible", "collapse"]),
    ("sr", &["sr-only", "not-sr-only"]),
    ("inset", &["inset-*", "-inset-*"]),
    ("inset-x", &["inset-x-*", "-inset-x-*"]),
    ("inset-y", &["inset-y-*", "-inset-y-*"]),
    ("top", &["top-*", "-top-*"]),
    ("right", &["right-*", "-right-*"]),
    ("bottom", &["bottom-*", "-bottom-*"]),
    ("left", &["left-*", "-left-*"]),
    ("z", &["z-*"]),
    (
        "overflow",
        &[
            "overflow-auto",
            "overflow-hidden",
            "overflow-clip",
            "overflow-visible",
            "overflow-scroll",
        ],
    ),
    ("overflow-x", &["overflow-x-*"]),
    ("overflow-y", &["overflow-y-*"]),
    (
        "flex-direction",
        &["flex-row", "flex-row-reverse", "flex-col", "flex-col-reverse"],
    ),
    ("flex-wrap", &["flex-wrap", "flex-wrap-reverse", "flex-nowrap"]),
    ("flex", &["flex-1", "flex-auto", "flex-initial", "flex-none"]),
    ("basis", &["basis-*"]),
    ("grow", &["grow", "grow-*"]),
    ("shrink", &["shrink", "shrink-*"]),
    ("order", &["order-*", "-order-*"]),
    ("grid-cols", &["grid-cols-*"]),
    ("grid-rows", &["grid-rows-*"]),
    ("grid-flow", &["grid-flow-*"]),
    ("auto-cols", &["auto-cols-*"]),
    ("auto-rows", &["auto-rows-*"]),
    ("col-start-end", &["col-auto", "col-span-*"]),
    ("col-start", &["col-start-*"]),
    ("col-end", &["col-end-*"]),
    ("row-start-end", &["row-auto", "row-span-*"]),
    ("row-start", &["row-start-*"]),
    ("row-end", &["row-end-*"]),
    ("columns", &["columns-*"]),
    ("aspect", &["aspect-*"]),
    ("box", &["box-border", "box-content"]),
    ("float", &["float-*"]),
    ("clear", &["clear-*"]),
    ("isolation", &["isolate", "isolation-auto"]),
    (
        "object-fit",
        &[
            "object-contain",
            "object-cover",
            "object-fill",
            "object-none",
            "object-scale-down",
        ],
    ),
    (
        "object-position",
        &[
            "object-bottom",
            "object-center",
            "object-left",
            "object-left-bottom",
            "object-left-top",
            "object-right",
            "object-right-bottom",
            "object-right-top",
            "object-top",
        ],
    ),
    (
        "justify-content",
        &[
            "justify-start",
            "justify-end",
            "justify-center",
            "justify-between",
            "justify-around",
            "justify-evenly",
        ],
    ),
    (
        "align-items",
        &[
            "items-start",
            "items-end",
            "items-center",
            "items-baseline",
            "items-stretch",
        ],
    ),
    (
        "align-content",
        &[
            "content-normal",
            "content-center",
            "content-start",
            "content-end",
            "content-between",
            "content-around",
            "content-evenly",
            "content-baseline",
            "content-stretch",
        ],
    ),
    (
        "align-self",
        &[
            "self-auto",
            "self-start",
            "self-end",
            "self-center",
            "self-stretch",
            "self-baseline",
        ],
    ),
    (
        "justify-items",
        &[
            "justify-items-start",
            "justify-items-end",
            "justify-items-center",
            "justify-items-stretch",
        ],
    ),
    (
        "justify-self",
        &[
            "justify-self-auto",
            "justify-self-start",
            "justify-self-end",
            "justify-self-center",
            "justify-self-stretch",
        ],
    ),
    ("place-content", &["place-content-*"]),
    ("place-items", &["place-items-*"]),
    ("place-self", &["place-self-*"]),
    ("gap", &["gap-*"]),
    ("gap-x", &["gap-x-*"]),
    ("gap-y", &["gap-y-*"]),
    ("p", &["p-*"]),
    ("px", &["px-*"]),
    ("py", &["py-*"]),
    ("ps", &["ps-*"]),
    ("pe", &["pe-*"]),
    ("pt", &["pt-*"]),
    ("pr", &["pr-*"]),
    ("pb", &["pb-*"]),
    ("pl", &["pl-*"]),
    ("m", &["m-*", "-m-*"]),
    ("mx", &["mx-*", "-mx-*"]),
    ("my", &["my-*", "-my-*"]),
    ("ms", &["ms-*", "-ms-*"]),
    ("me", &["me-*", "-me-*"]),
    ("mt", &["mt-*", "-mt-*"]),
    ("mr", &["mr-*", "-mr-*"]),
    ("mb", &["mb-*", "-mb-*"]),
    ("ml", &["ml-*", "-ml-*"]),
    ("space-x", &["space-x-*", "-space-x-*"]),
    ("space-y", &["space-y-*", "-space-y-*"]),
    ("size", &["size-*"]),
    ("w", &["w-*"]),
    ("min-w", &["min-w-*"]),
    ("max-w", &["max-w-*"]),
    ("h", &["h-*"]),
    ("min-h", &["min-h-*"]),
    ("max-h", &["max-h-*"]),
    ("font-size", &["text-$fontSize", "text-[length]"]),
    ("font-weight", &["font-$fontWeight", "font-[number]"]),
    ("font-family", &["font-sans", "font-serif", "font-mono"]),
    ("font-style", &["italic", "not-italic"]),
    (
        "text-alignment",
        &[
            "text-left",
            "text-center",
            "text-right",
            "text-justify",
            "text-start",
            "text-end",
        ],
    ),
    ("text-overflow", &["truncate", "text-ellipsis", "text-clip"]),
    ("text-wrap", &["text-wrap", "text-nowrap", "text-balance", "text-pretty"]),
    ("text-color", &["text-$colors", "text-[color]"]),
    (
        "text-decoration",
        &["underline", "overline", "line-through", "no-underline"],
    ),
    (
        "decoration-style",
        &[
            "decoration-solid",
            "decoration-double",
            "decoration-dotted",
            "decoration-dashed",
            "decoration-wavy",
        ],
    ),
    (
        "decoration-thickness",
        &["decoration-$decorationThickness", "decoration-[length]"],
    ),
    ("decoration-color", &["decoration-$colors", "decoration-[color]"]),
    ("underline-offset", &["underline-offset-*"]),
    (
        "text-transform",
        &["uppercase", "lowercase", "capitalize", "normal-case"],
    ),
    ("leading", &["leading-*"]),
    ("tracking", &["tracking-*", "-tracking-*"]),
    ("whitespace", &["whitespace-*"]),
    (
        "word-break",
        &["break-normal", "break-words", "break-all", "break-keep"],
    ),
    ("line-clamp", &["line-clamp-*"]),
    ("list-style-type", &["list-none", "list-disc", "list-decimal"]),
    ("list-style-position", &["list-inside", "list-outside"]),
    ("bg-size", &["bg-auto", "bg-cover", "bg-contain"]),
    ("bg-repeat", &["bg-repeat", "bg-no-repeat", "bg-repeat-x", "bg-repeat-y"]),
    ("bg-attachment", &["bg-fixed", "bg-local", "bg-scroll"]),
    (
        "bg-clip",
        &["bg-clip-border", "bg-clip-padding", "bg-clip-content", "bg-clip-text"],
    ),
    (
        "bg-origin",
        &["bg-origin-border", "bg-origin-padding", "bg-origin-content"],
    ),
    (
        "bg-position",
        &[
            "bg-bottom",
            "bg-center",
            "bg-left",
            "bg-left-bottom",
            "bg-left-top",
            "bg-right",
            "bg-right-bottom",
            "bg-right-top",
            "bg-top",
        ],
    ),
    (
        "bg-image",
        &[
            "bg-none",
            "bg-gradient-to-t",
            "bg-gradient-to-tr",
            "bg-gradient-to-r",
            "bg-gradient-to-br",
            "bg-gradient-to-b",
            "bg-gradient-to-bl",
            "bg-gradient-to-l",
            "bg-gradient-to-tl",
            "bg-[image]",
        ],
    ),
    ("bg-color", &["bg-$colors", "bg-[color]"]),
    ("gradient-from", &["from-$colors", "from-[color]"]),
    ("gradient-via", &["via-$colors", "via-[color]"]),
    ("gradient-to", &["to-$colors", "to-[color]"]),
    ("rounded", &["rounded", "rounded-$radius"]),
    ("rounded-t", &["rounded-t", "rounded-t-$radius"]),
    ("rounded-r", &["rounded-r", "rounded-r-$radius"]),
    ("rounded-b", &["rounded-b", "rounded-b-$radius"]),
    ("rounded-l", &["rounded-l", "rounded-l-$radius"]),
    ("border-w", &["border", "border-$borderWidth", "border-[length]"]),
    ("border-w-x", &["border-x", "border-x-$borderWidth"]),
    ("border-w-y", &["border-y", "border-y-$borderWidth"]),
    ("border-w-t", &["border-t", "border-t-$borderWidth"]),
    ("border-w-r", &["border-r", "border-r-$borderWidth"]),
    ("border-w-b", &["border-b", "border-b-$borderWidth"]),
    ("border-w-l", &["border-l", "border-l-$borderWidth"]),
    (
        "border-style",
        &[
            "border-solid",
            "border-dashed",
            "border-dotted",
            "border-double",
            "border-hidden",
            "border-none",
        ],
    ),
    ("border-color", &["border-$colors", "border-[color]"]),
    ("divide-x", &["divide-x", "divide-x-$borderWidth"]),
    ("divide-y", &["divide-y", "divide-y-$borderWidth"]),
    ("divide-color", &["divide-$colors", "divide-[color]"]),
    ("ring-w", &["ring", "ring-$ringWidth", "ring-[length]"]),
    ("ring-offset-w", &["ring-offset-$ringWidth"]),
    ("ring-offset-color", &["ring-offset-$colors", "ring-offset-[color]"]),
    ("ring-color", &["ring-$colors", "ring-[color]"]),
    (
        "outline-style",
        &[
            "outline",
            "outline-none",
            "outline-dashed",
            "outline-dotted",
            "outline-double",
        ],
    ),
    ("outline-w", &["outline-$outlineWidth", "outline-[length]"]),
    ("outline-offset", &["outline-offset-$outlineWidth"]),
    ("outline-color", &["outline-$colors", "outline-[color]"]),
    ("shadow", &["shadow", "shadow-$shadow"]),
    ("shadow-color", &["shadow-$colors", "shadow-[color]"]),
    ("accent", &["accent-$colors", "accent-[color]"]),
    ("caret", &["caret-$colors", "caret-[color]"]),
    ("placeholder-color", &["placeholder-$colors", "placeholder-[color]"]),
    ("fill", &["fill-none", "fill-$colors", "fill-[color]"]),
    ("stroke", &["stroke-none", "stroke-$colors", "stroke-[color]"]),
    ("opacity", &["opacity-*"]),
    ("cursor", &["cursor-*"]),
    ("pointer-events", &["pointer-events-none", "pointer-events-auto"]),
    (
        "select",
        &["select-none", "select-text", "select-all", "select-auto"],
    ),
    (
        "transition",
        &[
            "transition",
            "transition-all",
            "transition-colors",
            "transition-opacity",
            "transition-shadow",
            "transition-transform",
            "transition-none",
        ],
    ),
    ("duration", &["duration-*"]),
    ("ease", &["ease-linear", "ease-in", "ease-out", "ease-in-out"]),
    ("delay", &["delay-*"]),
    ("animate", &["animate-*"]),
    ("scale", &["scale-*"]),
    ("rotate", &["rotate-*", "-rotate-*"]),
    ("translate-x", &["translate-x-*", "-translate-x-*"]),
    ("translate-y", &["translate-y-*", "-translate-y-*"]),
];

const DEFAULT_CONFLICTING_CLASS_GROUPS: Entries = &[
    ("flex", &["basis", "grow", "shrink"]),
    ("line-clamp", &["display", "overflow"]),
    ("inset", &["inset-x", "inset-y", "top", "right", "bottom", "left"]),
    ("inset-x", &["right", "left"]),
    ("inset-y", &["top", "bottom"]),
    ("overflow", &["overflow-x", "overflow-y"]),
    ("gap", &["gap-x", "gap-y"]),
    ("p", &["px", "py", "ps", "pe", "pt", "pr", "pb", "pl"]),
    ("px", &["pr", "pl"]),
    ("py", &["pt", "pb"]),
    ("m", &["mx", "my", "ms", "me", "mt", "mr", "mb", "ml"]),
    ("mx", &["mr", "ml"]),
    ("my", &["mt", "mb"]),
    ("size", &["w", "h"]),
    ("rounded", &["rounded-t", "rounded-r", "rounded-b", "rounded-l"]),
    (
        "border-w",
        &[
            "border-w-x",
            "border-w-y",
            "border-w-t",
            "border-w-r",
            "border-w-b",
            "border-w-l",
        ],
    ),
    ("border-w-x", &["border-w-r", "border-w-l"]),
    ("border-w-y", &["border-w-t", "border-w-b"]),
];

const DEFAULT_CONFLICTING_CLASS_GROUP_MODIFIERS: Entries = &[("font-size", &["leading"])];

fn to_table(entries: Entries) -> Table {
    entries
        .iter()
        .map(|(key, values)| {
            (
                key.to_string(),
                values.iter().map(|v| v.to_string()).collect(),
            )
        })
        .collect()
}

fn default_theme() -> Table {
    let mut theme = to_table(DEFAULT_THEME);
    theme.insert("colors".to_string(), color_values());
    theme
}

fn replace(table: &mut Table, overrides: &Table) {
    for (key, values) in overrides {
        table.insert(key.clone(), values.clone());
    }
}

fn extend(table: &mut Table, additions: &Table) {
    for (key, values) in additions {
        table
            .entry(key.clone())
            .or_default()
            .extend(values.iter().cloned());
    }
}

/// The effective tables: defaults, then replacements, then extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tables {
    pub prefix: Option<String>,
    pub separator: String,
    pub theme: Table,
    pub class_groups: Table,
    pub conflicting_class_groups: Table,
    pub conflicting_class_group_modifiers: Table,
}

impl Tables {
    pub fn defaults() -> Self {
        Self {
            prefix: None,
            separator: ":".to_string(),
            theme: default_theme(),
            class_groups: to_table(DEFAULT_CLASS_GROUPS),
            conflicting_class_groups: to_table(DEFAULT_CONFLICTING_CLASS_GROUPS),
            conflicting_class_group_modifiers: to_table(DEFAULT_CONFLICTING_CLASS_GROUP_MODIFIERS),
        }
    }

    pub fn from_config(config: &MergeConfig) -> Self {
        let mut tables = Self::defaults();
        tables.prefix = config.prefix.clone().filter(|p| !p.is_empty());
        if let Some(separator) = config.separator.as_ref().filter(|s| !s.is_empty()) {
            tables.separator = separator.clone();
        }

        replace(&mut tables.theme, &config.theme);
        replace(&mut tables.class_groups, &config.class_groups);
        replace(
            &mut tables.conflicting_class_groups,
            &config.conflicting_class_groups,
        );
        replace(
            &mut tables.conflicting_class_group_modifiers,
            &config.conflicting_class_group_modifiers,
        );

        extend(&mut tables.theme, &config.extend.theme);
        extend(&mut tables.class_groups, &config.extend.class_groups);
        extend(
            &mut tables.conflicting_class_groups,
            &config.extend.conflicting_class_groups,
        );
        extend(
            &mut tables.conflicting_class_group_modifiers,
            &config.extend.conflicting_class_group_modifiers,
        );

        tables
    }

    /// Verifies every theme reference and conflict rule resolves.
    pub fn check(&self) -> Result<(), MergeConfigError> {
        for (group, patterns) in &self.class_groups {
            for pattern in patterns {
                if pattern.is_empty() {
                    return Err(MergeConfigError::EmptyPattern {
                        group: group.clone(),
                    });
                }
                if let Some((_, key)) = pattern.split_once('$') {
                    if !self.theme.contains_key(key) {
                        return Err(MergeConfigError::UnknownThemeKey {
                            group: group.clone(),
                            key: key.to_string(),
                        });
                    }
                } else if let Some((_, kind)) = arbitrary_pattern(pattern) {
                    if ValueKind::from_name(kind).is_none() {
                        return Err(MergeConfigError::UnknownValueKind {
                            group: group.clone(),
                            kind: kind.to_string(),
                        });
                    }
                }
            }
        }

        let rules = self
            .conflicting_class_groups
            .iter()
            .chain(&self.conflicting_class_group_modifiers);
        for (from, targets) in rules {
            let unknown = std::iter::once(from)
                .chain(targets)
                .find(|id| !self.class_groups.contains_key(id.as_str()));
            if let Some(to) = unknown {
                return Err(MergeConfigError::UnknownClassGroup {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        assert!(Tables::defaults().check().is_ok());
    }

    #[test]
    fn test_replace_then_extend() {
        let config = MergeConfig::new()
            .theme("radius", ["pill"])
            .extend_theme("radius", ["blob"]);
        let tables = Tables::from_config(&config);
        assert_eq!(
            tables.theme["radius"],
            vec!["pill".to_string(), "blob".to_string()]
        );
    }

    #[test]
    fn test_extend_keeps_defaults() {
        let config = MergeConfig::new().extend_theme("fontSize", ["huge"]);
        let tables = Tables::from_config(&config);
        let sizes = &tables.theme["fontSize"];
        assert!(sizes.contains(&"lg".to_string()));
        assert_eq!(sizes.last().map(String::as_str), Some("huge"));
    }

    #[test]
    fn test_prefix_and_separator() {
        let tables = Tables::from_config(&MergeConfig::new().prefix("tw-").separator("_"));
        assert_eq!(tables.prefix.as_deref(), Some("tw-"));
        assert_eq!(tables.separator, "_");

        let tables = Tables::from_config(&MergeConfig::new().prefix(""));
        assert_eq!(tables.prefix, None);
        assert_eq!(tables.separator, ":");
    }

    #[test]
    fn test_color_theme() {
        let colors = &Tables::defaults().theme["colors"];
        assert!(colors.contains(&"black".to_string()));
        assert!(colors.contains(&"red-500".to_string()));
        assert!(colors.contains(&"slate-950".to_string()));
        assert!(!colors.contains(&"wrap".to_string()));
    }

    #[test]
    fn test_check_reports_unknown_value_kind() {
        let config = MergeConfig::new().class_group("mask", ["mask-[shape]"]);
        assert_eq!(
            Tables::from_config(&config).check(),
            Err(MergeConfigError::UnknownValueKind {
                group: "mask".to_string(),
                kind: "shape".to_string(),
            })
        );
    }

    #[test]
    fn test_check_reports_unknown_conflict_source() {
        let config = MergeConfig::new().conflicting_class_groups("ghost", ["p"]);
        assert_eq!(
            Tables::from_config(&config).check(),
            Err(MergeConfigError::UnknownClassGroup {
                from: "ghost".to_string(),
                to: "ghost".to_string(),
            })
        );
    }
}
