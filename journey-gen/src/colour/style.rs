//! Inline CSS style parsing.

use std::collections::BTreeMap;

use crate::domain::Colour;

/// Property name → raw value, as found in an element's `style` attribute.
pub type StyleMap = BTreeMap<String, String>;

/// Parse an inline style such as `"background-color: rgb(0, 0, 0); color: #fff"`.
///
/// Property names are lower-cased. Declarations without a colon are skipped.
pub fn parse_style(style: &str) -> StyleMap {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_ascii_lowercase(), value.trim().to_string()))
        })
        .collect()
}

/// Read a CSS colour value: `rgb(r, g, b)`, `rgba(r, g, b, a)` or `#rrggbb`.
///
/// ```
/// use journey_gen::colour::parse_css_colour;
/// use journey_gen::domain::Colour;
///
/// assert_eq!(parse_css_colour("rgb(128, 128, 128)"), Some(Colour::GREY));
/// assert_eq!(parse_css_colour("#FFFFFF"), Some(Colour::WHITE));
/// assert_eq!(parse_css_colour("red"), None);
/// ```
pub fn parse_css_colour(value: &str) -> Option<Colour> {
    let value = value.trim();
    if value.starts_with('#') {
        return Colour::parse_hex(value).ok();
    }

    let args = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let mut channels = args.split(',').map(|c| c.trim().parse::<u8>());
    let r = channels.next()?.ok()?;
    let g = channels.next()?.ok()?;
    let b = channels.next()?.ok()?;
    Some(Colour::rgb(r, g, b))
}

/// The colour of `property`, or `fallback` when it is missing or unreadable.
pub fn style_colour(style: &StyleMap, property: &str, fallback: Colour) -> Colour {
    style
        .get(property)
        .and_then(|v| parse_css_colour(v))
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_badge_style() {
        let style = parse_style("background-color: rgb(0, 94, 184); color: rgb(255, 255, 255);");
        assert_eq!(style.len(), 2);
        assert_eq!(style["background-color"], "rgb(0, 94, 184)");
        assert_eq!(style["color"], "rgb(255, 255, 255)");
    }

    #[test]
    fn tolerates_odd_spacing_and_junk() {
        let style = parse_style("Color:#123456;;nonsense; border : 1px solid");
        assert_eq!(style["color"], "#123456");
        assert_eq!(style["border"], "1px solid");
        assert!(!style.contains_key("nonsense"));
    }

    #[test]
    fn css_colour_forms() {
        assert_eq!(parse_css_colour("rgb(0, 94, 184)"), Some(Colour::rgb(0, 94, 184)));
        assert_eq!(parse_css_colour("rgb(0,94,184)"), Some(Colour::rgb(0, 94, 184)));
        assert_eq!(parse_css_colour("rgba(1, 2, 3, 0.5)"), Some(Colour::rgb(1, 2, 3)));
        assert_eq!(parse_css_colour("rgb(256, 0, 0)"), None);
        assert_eq!(parse_css_colour("rgb(1, 2)"), None);
        assert_eq!(parse_css_colour(""), None);
    }

    #[test]
    fn falls_back_when_missing_or_unreadable() {
        let style = parse_style("background-color: transparent");
        assert_eq!(style_colour(&style, "background-color", Colour::GREY), Colour::GREY);
        assert_eq!(style_colour(&style, "color", Colour::WHITE), Colour::WHITE);
    }
}
