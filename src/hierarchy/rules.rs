//! Individual heading conditions.
//!
//! Every function here is a pure predicate over a fragment (and, where
//! needed, the document profile). A fragment has to pass the conditions a
//! [`Policy`](super::Policy) selects to count as a heading.

use crate::geometry::Whitespace;
use crate::model::{DocumentStyleProfile, Fragment};

/// At least two alphabetic characters.
pub fn min_alpha(fragment: &Fragment) -> bool {
    let mut alpha = 0;
    for word in fragment.text.split_whitespace() {
        for c in word.chars() {
            if c.is_alphabetic() {
                alpha += 1;
                if alpha >= 2 {
                    return true;
                }
            }
        }
    }
    false
}

/// At least `min` characters.
pub fn min_length(fragment: &Fragment, min: usize) -> bool {
    fragment.text.chars().count() >= min
}

/// Neither of the last two characters is a period.
pub fn no_dot_at_end(fragment: &Fragment) -> bool {
    !fragment.text.chars().rev().take(2).any(|c| c == '.')
}

/// No digit from the first letter onward.
///
/// Leading enumerations ("2. Risks") are allowed; numbers after the first
/// letter are not. Text without letters is scanned in full.
pub fn check_digit(fragment: &Fragment) -> bool {
    let text = &fragment.text;
    let start = first_alpha(text).map(|(i, _)| i).unwrap_or(0);
    !text[start..].chars().any(char::is_numeric)
}

/// Every character is printable ASCII.
pub fn check_special_char(fragment: &Fragment) -> bool {
    fragment
        .text
        .chars()
        .all(|c| c.is_ascii_graphic() || matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'))
}

/// Text starting with an uppercase letter consists of letters, `:` and `?`.
///
/// The first letter must sit within the first three characters and be
/// uppercase; anything else is indeterminate and counts as `false`.
pub fn string_validity(fragment: &Fragment) -> bool {
    let text = &fragment.text;
    let Some((start, first)) = first_alpha(text) else {
        return false;
    };
    let char_pos = text[..start].chars().count();
    if char_pos >= 3 || !first.is_uppercase() {
        return false;
    }
    text[start..]
        .chars()
        .filter(|c| *c != ' ')
        .all(|c| c.is_alphabetic() || c == ':' || c == '?')
}

/// Dominant size is larger than the document's common size.
pub fn larger_than_common(fragment: &Fragment, profile: &DocumentStyleProfile) -> bool {
    fragment.style.dominant_size > profile.common_size
}

/// Dominant color differs from the document's common color.
pub fn color_differs_from_common(fragment: &Fragment, profile: &DocumentStyleProfile) -> bool {
    fragment.style.dominant_color != profile.common_color
}

/// Dominant font differs from the document's common font.
pub fn font_differs_from_common(fragment: &Fragment, profile: &DocumentStyleProfile) -> bool {
    fragment.style.dominant_font != profile.common_font
}

/// Font name says bold.
pub fn check_bold(fragment: &Fragment) -> bool {
    fragment.style.bold
}

/// Font name says italic.
pub fn check_italic(fragment: &Fragment) -> bool {
    fragment.style.italic
}

/// Title case for plain text; always true for emphasized text.
pub fn is_title(fragment: &Fragment) -> bool {
    if fragment.style.is_emphasized() {
        return true;
    }
    fragment
        .text
        .split(' ')
        .filter(|word| !word.is_empty())
        .all(|word| word.chars().next().is_some_and(char::is_uppercase))
}

/// Horizontally centered within `threshold` percent.
pub fn centered(fragment: &Fragment, threshold: f32) -> bool {
    whitespace(fragment).is_centered(threshold)
}

/// More than `min` percent whitespace on the left.
pub fn left_space(fragment: &Fragment, min: f32) -> bool {
    whitespace(fragment).left() as f32 > min
}

/// More than `min` percent whitespace on the right.
pub fn right_space(fragment: &Fragment, min: f32) -> bool {
    whitespace(fragment)
        .right()
        .is_some_and(|right| right as f32 > min)
}

/// Width differs from the container by more than `min` percent.
pub fn whitespace_ratio(fragment: &Fragment, min: f32) -> bool {
    whitespace(fragment).ratio() as f32 > min
}

/// Whitespace against the block, or against the page when the fragment
/// fills its block.
fn whitespace(fragment: &Fragment) -> Whitespace {
    let block = Whitespace::new(fragment.container_bbox, fragment.bbox);
    if block.one_span() {
        Whitespace::new(fragment.page_bbox, fragment.bbox)
    } else {
        block
    }
}

/// Byte offset and value of the first alphabetic character.
fn first_alpha(text: &str) -> Option<(usize, char)> {
    text.char_indices().find(|(_, c)| c.is_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::model::StyleDescriptor;

    fn frag(text: &str) -> Fragment {
        Fragment {
            text: text.to_string(),
            style: StyleDescriptor::default(),
            bbox: Rect::new(0.0, 0.0, 100.0, 10.0),
            container_bbox: Rect::new(0.0, 0.0, 100.0, 10.0),
            page_bbox: Rect::new(0.0, 0.0, 600.0, 800.0),
            page_index: 0,
        }
    }

    fn placed(bbox: Rect, container: Rect) -> Fragment {
        Fragment {
            bbox,
            container_bbox: container,
            ..frag("Heading")
        }
    }

    #[test]
    fn test_min_alpha() {
        assert!(min_alpha(&frag("a b")));
        assert!(!min_alpha(&frag("1 a 2")));
        assert!(!min_alpha(&frag("")));
    }

    #[test]
    fn test_min_length_counts_chars() {
        assert!(min_length(&frag("Risk"), 4));
        assert!(!min_length(&frag("Ris"), 4));
        assert!(min_length(&frag("Überé"), 5));
    }

    #[test]
    fn test_no_dot_at_end_checks_two_chars() {
        assert!(no_dot_at_end(&frag("Purpose")));
        assert!(!no_dot_at_end(&frag("Purpose.")));
        assert!(!no_dot_at_end(&frag("etc.)")));
        assert!(no_dot_at_end(&frag("e.g. this")));
    }

    #[test]
    fn test_check_digit() {
        assert!(check_digit(&frag("2. Risks")));
        assert!(!check_digit(&frag("Risks 2020")));
        assert!(!check_digit(&frag("123")));
        assert!(check_digit(&frag("")));
    }

    #[test]
    fn test_special_char() {
        assert!(check_special_char(&frag("What is this product?")));
        assert!(!check_special_char(&frag("Überblick")));
        assert!(!check_special_char(&frag("• bullet")));
    }

    #[test]
    fn test_string_validity() {
        assert!(string_validity(&frag("What is this product?")));
        assert!(string_validity(&frag("Product: Fund")));
        assert!(!string_validity(&frag("Costs over time (EUR)")));
        // First letter too far in
        assert!(!string_validity(&frag("1.2 Costs")));
        // Lowercase start is indeterminate
        assert!(!string_validity(&frag("costs")));
        assert!(!string_validity(&frag("")));
        assert!(!string_validity(&frag("42")));
    }

    #[test]
    fn test_is_title() {
        assert!(is_title(&frag("Key Information Document")));
        assert!(!is_title(&frag("Key information document")));
        assert!(is_title(&frag("")));

        let mut emphasized = frag("lower case");
        emphasized.style.italic = true;
        assert!(is_title(&emphasized));
    }

    #[test]
    fn test_profile_comparisons() {
        let profile = DocumentStyleProfile {
            common_size: 10.0,
            common_font: "Arial".to_string(),
            common_color: 0,
            ..Default::default()
        };
        let mut f = frag("Heading");
        f.style.dominant_size = 10.0;
        f.style.dominant_font = "Arial".to_string();
        assert!(!larger_than_common(&f, &profile));
        assert!(!color_differs_from_common(&f, &profile));
        assert!(!font_differs_from_common(&f, &profile));

        f.style.dominant_size = 12.0;
        f.style.dominant_color = 0x1f3864;
        f.style.dominant_font = "Arial-Bold".to_string();
        assert!(larger_than_common(&f, &profile));
        assert!(color_differs_from_common(&f, &profile));
        assert!(font_differs_from_common(&f, &profile));
    }

    #[test]
    fn test_positional_against_block() {
        let block = Rect::new(100.0, 0.0, 500.0, 40.0);
        let f = placed(Rect::new(250.0, 0.0, 350.0, 10.0), block);

        assert!(centered(&f, 10.0));
        assert!(left_space(&f, 0.1));
        assert!(right_space(&f, 0.25));
        assert!(whitespace_ratio(&f, 20.0));
    }

    #[test]
    fn test_positional_falls_back_to_page() {
        // Fragment fills its block: compare against the page instead
        let bbox = Rect::new(40.0, 0.0, 200.0, 10.0);
        let f = placed(bbox, bbox);

        assert!(!centered(&f, 10.0));
        assert!(left_space(&f, 0.1));
        assert!(right_space(&f, 0.25));
        // 160 / 600 -> 73% narrower than the page
        assert!(whitespace_ratio(&f, 20.0));
    }

    #[test]
    fn test_right_space_overflow() {
        let f = placed(
            Rect::new(100.0, 0.0, 520.0, 10.0),
            Rect::new(50.0, 0.0, 500.0, 10.0),
        );
        assert!(!right_space(&f, 0.25));
    }
}
