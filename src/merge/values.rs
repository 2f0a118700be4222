//! Arbitrary value classification.
//!
//! A class group pattern such as `text-[length]` accepts `text-[14px]` but
//! not `text-[#333]`, which `text-[color]` claims instead. An explicit label
//! (`text-[length:var(--size)]`) always decides the kind.

const COLOR_FUNCTIONS: &[&str] = &[
    "rgb(", "rgba(", "hsl(", "hsla(", "hwb(", "lab(", "lch(", "oklab(", "oklch(", "color(",
    "color-mix(",
];

const IMAGE_FUNCTIONS: &[&str] = &[
    "url(",
    "image(",
    "image-set(",
    "cross-fade(",
    "element(",
    "linear-gradient(",
    "radial-gradient(",
    "conic-gradient(",
    "repeating-linear-gradient(",
    "repeating-radial-gradient(",
    "repeating-conic-gradient(",
];

const LENGTH_FUNCTIONS: &[&str] = &["calc(", "min(", "max(", "clamp("];

const LENGTH_UNITS: &[&str] = &[
    "px", "rem", "em", "%", "vh", "vw", "vmin", "vmax", "dvh", "dvw", "svh", "svw", "lvh", "lvw",
    "ch", "ex", "lh", "rlh", "pt", "pc", "in", "cm", "mm", "q", "cqw", "cqh", "cqi", "cqb",
    "cqmin", "cqmax",
];

/// The kind of value an arbitrary-value pattern accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueKind {
    Color,
    Length,
    Image,
    Number,
}

impl ValueKind {
    /// Parses the name used inside a pattern's brackets.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "color" => Some(ValueKind::Color),
            "length" => Some(ValueKind::Length),
            "image" => Some(ValueKind::Image),
            "number" => Some(ValueKind::Number),
            _ => None,
        }
    }

    /// Returns `true` if `value` (the text between the brackets) is of this kind.
    pub fn accepts(self, value: &str) -> bool {
        match label(value) {
            Some((name, _)) => label_kind(name) == Some(self),
            None => classify(value) == Some(self),
        }
    }
}

/// Splits a pattern such as `text-[length]` into its prefix and kind name.
pub(crate) fn arbitrary_pattern(pattern: &str) -> Option<(&str, &str)> {
    let inner = pattern.strip_suffix(']')?;
    let open = inner.rfind('[')?;
    Some((&inner[..open], &inner[open + 1..]))
}

/// Returns the text inside `[...]`, if `value` is an arbitrary value.
pub(crate) fn arbitrary_value(value: &str) -> Option<&str> {
    value
        .strip_prefix('[')?
        .strip_suffix(']')
        .filter(|inner| !inner.is_empty())
}

fn label(value: &str) -> Option<(&str, &str)> {
    let (name, rest) = value.split_once(':')?;
    let is_label = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c == '-');
    is_label.then_some((name, rest))
}

fn label_kind(name: &str) -> Option<ValueKind> {
    match name {
        "color" => Some(ValueKind::Color),
        "length" | "size" | "percentage" => Some(ValueKind::Length),
        "image" | "url" => Some(ValueKind::Image),
        "number" => Some(ValueKind::Number),
        _ => None,
    }
}

fn classify(value: &str) -> Option<ValueKind> {
    let lower = value.to_ascii_lowercase();
    let starts_with_any = |prefixes: &[&str]| prefixes.iter().any(|p| lower.starts_with(p));

    if lower.starts_with('#') || starts_with_any(COLOR_FUNCTIONS) {
        Some(ValueKind::Color)
    } else if starts_with_any(IMAGE_FUNCTIONS) {
        Some(ValueKind::Image)
    } else if starts_with_any(LENGTH_FUNCTIONS) || is_length(&lower) {
        Some(ValueKind::Length)
    } else if lower.parse::<f64>().is_ok() {
        Some(ValueKind::Number)
    } else {
        None
    }
}

fn is_length(value: &str) -> bool {
    if value == "0" {
        return true;
    }
    let split = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);
    number.parse::<f64>().is_ok() && LENGTH_UNITS.contains(&unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_colors() {
        assert!(ValueKind::Color.accepts("#fff"));
        assert!(ValueKind::Color.accepts("rgb(0,0,0)"));
        assert!(ValueKind::Color.accepts("color:var(--brand)"));
        assert!(!ValueKind::Color.accepts("14px"));
    }

    #[test]
    fn test_classify_lengths() {
        assert!(ValueKind::Length.accepts("14px"));
        assert!(ValueKind::Length.accepts("1.5rem"));
        assert!(ValueKind::Length.accepts("50%"));
        assert!(ValueKind::Length.accepts("0"));
        assert!(ValueKind::Length.accepts("calc(100%-1rem)"));
        assert!(ValueKind::Length.accepts("length:var(--size)"));
        assert!(!ValueKind::Length.accepts("600"));
        assert!(!ValueKind::Length.accepts("var(--size)"));
    }

    #[test]
    fn test_classify_images_and_numbers() {
        assert!(ValueKind::Image.accepts("url(a.png)"));
        assert!(ValueKind::Image.accepts("linear-gradient(red,blue)"));
        assert!(ValueKind::Number.accepts("600"));
        assert!(!ValueKind::Number.accepts("600px"));
    }

    #[test]
    fn test_pattern_and_value_parsing() {
        assert_eq!(arbitrary_pattern("text-[length]"), Some(("text-", "length")));
        assert_eq!(arbitrary_pattern("text-*"), None);
        assert_eq!(arbitrary_value("[14px]"), Some("14px"));
        assert_eq!(arbitrary_value("[]"), None);
        assert_eq!(arbitrary_value("lg"), None);
        assert_eq!(ValueKind::from_name("image"), Some(ValueKind::Image));
        assert_eq!(ValueKind::from_name("shape"), None);
    }
}
