use crate::models::prompt::LayoutType;

/// Bump whenever `LAYOUT_KEYWORDS` changes order or content.
pub const LAYOUT_RULES_VERSION: u32 = 2;

/// Canonical layout keywords in priority order.
pub const LAYOUT_KEYWORDS: &[(&str, LayoutType)] = &[
    ("carousel", LayoutType::Carousel),
    ("grid", LayoutType::Grid),
    ("timeline", LayoutType::Timeline),
    ("moodboard", LayoutType::Moodboard),
    ("storyboard", LayoutType::Storyboard),
    ("gallery", LayoutType::Gallery),
    ("stacked", LayoutType::Stacked),
];

/// Case-insensitive substring scan; the first keyword in table order wins.
pub fn detect_layout(text: &str) -> Option<LayoutType> {
    let lower = text.to_lowercase();
    LAYOUT_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, layout)| *layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_every_keyword() {
        for (keyword, layout) in LAYOUT_KEYWORDS {
            let text = format!("show it as a {}", keyword.to_uppercase());
            assert_eq!(detect_layout(&text), Some(*layout));
        }
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(detect_layout("gallery or grid"), Some(LayoutType::Grid));
        assert_eq!(
            detect_layout("a stacked timeline"),
            Some(LayoutType::Timeline)
        );
    }

    #[test]
    fn test_no_keyword_returns_none() {
        assert_eq!(detect_layout("just my posts"), None);
    }
}
