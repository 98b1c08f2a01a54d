//! Named output sizes for the platforms we target

use crate::Viewport;

/// Preset name to viewport, in the order they are listed to users.
pub const PRESETS: [(&str, Viewport); 5] = [
    ("carousel", Viewport::new(1080, 1350)),
    ("feed", Viewport::new(1080, 1350)),
    ("square", Viewport::new(1080, 1080)),
    ("reels", Viewport::new(1080, 1920)),
    ("story", Viewport::new(1080, 1920)),
];

/// Look up a preset by exact (case-sensitive) name.
pub fn lookup(name: &str) -> Option<Viewport> {
    PRESETS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| *v)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|(n, _)| *n)
}

/// Comma-separated preset names, for error messages.
pub fn available() -> String {
    names().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_resolve_to_expected_sizes() {
        assert_eq!(lookup("carousel"), Some(Viewport::new(1080, 1350)));
        assert_eq!(lookup("feed"), Some(Viewport::new(1080, 1350)));
        assert_eq!(lookup("square"), Some(Viewport::new(1080, 1080)));
        assert_eq!(lookup("reels"), Some(Viewport::new(1080, 1920)));
        assert_eq!(lookup("story"), Some(Viewport::new(1080, 1920)));
    }

    #[test]
    fn unknown_preset_is_none() {
        assert_eq!(lookup("bogus"), None);
        assert_eq!(lookup("Square"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn available_lists_names_in_order() {
        assert_eq!(available(), "carousel, feed, square, reels, story");
    }
}
