//! Rotating gradient tint for block-level text.

use crate::model::Element;
use crate::theme::{GradientTheme, Hsl};

/// Class added to every tinted element.
pub const GRADIENT_CLASS: &str = "gradient-text";

/// CSS custom property carrying the assigned color.
pub const GRADIENT_COLOR_PROPERTY: &str = "--gradient-color";

/// Elements that receive a color (lowercase).
pub const GRADIENT_TARGETS: &[&str] = &[
    "p", "li", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "td", "th", "dt", "dd",
];

/// Tint target elements under `root` with the theme's colors, round robin.
///
/// Targets with no visible text and anything inside `pre` or `code` are
/// skipped. [`GradientTheme::None`] removes existing tints instead.
/// Returns the number of elements tinted.
pub fn apply_gradient(root: &mut Element, theme: GradientTheme, dark: bool) -> usize {
    if theme.is_none() {
        remove_gradient(root);
        return 0;
    }

    let colors = theme.adjusted_colors(dark);
    let mut next = 0;
    tint_children(root, &colors, false, &mut next);
    log::debug!(
        "gradient: tinted {} elements with {} ({})",
        next,
        theme,
        if dark { "dark" } else { "light" }
    );
    next
}

/// Like [`apply_gradient`], taking a theme by its settings name.
///
/// Unknown names behave like `none`.
pub fn apply_gradient_named(root: &mut Element, name: &str, dark: bool) -> usize {
    match GradientTheme::from_name(name) {
        Some(theme) => apply_gradient(root, theme, dark),
        None => {
            log::warn!("gradient: unknown theme '{}', removing gradient", name);
            remove_gradient(root);
            0
        }
    }
}

fn tint_children(element: &mut Element, colors: &[Hsl], in_code: bool, next: &mut usize) {
    for child in element.children.iter_mut().filter_map(|n| n.as_element_mut()) {
        let child_in_code = in_code || child.is("pre") || child.is("code");

        if !child_in_code
            && GRADIENT_TARGETS.contains(&child.tag.as_str())
            && !child.text_content().trim().is_empty()
        {
            let color = colors[*next % colors.len()];
            child.set_style_property(GRADIENT_COLOR_PROPERTY, color.to_string());
            child.add_class(GRADIENT_CLASS);
            *next += 1;
        }

        tint_children(child, colors, child_in_code, next);
    }
}

/// Remove every tint under `root`. Returns the number of elements cleared.
pub fn remove_gradient(root: &mut Element) -> usize {
    let mut cleared = 0;
    for child in root.children.iter_mut().filter_map(|n| n.as_element_mut()) {
        if child.remove_class(GRADIENT_CLASS) {
            cleared += 1;
        }
        child.remove_style_property(GRADIENT_COLOR_PROPERTY);
        cleared += remove_gradient(child);
    }
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;

    fn sample() -> Element {
        parse_document(
            "<h1>Title</h1><p>one</p><p> </p><pre><p>code</p></pre><ul><li>a</li><li>b</li></ul>\
             <p>c</p><p>d</p><p>e</p>",
        )
    }

    #[test]
    fn test_round_robin_assignment() {
        let mut root = sample();
        let tinted = apply_gradient(&mut root, GradientTheme::Ocean, false);
        // h1, p(one), li(a), li(b), p(c), p(d), p(e)
        assert_eq!(tinted, 7);

        let h1 = root.find_tag("h1").unwrap();
        assert!(h1.has_class(GRADIENT_CLASS));
        assert_eq!(
            h1.style_property(GRADIENT_COLOR_PROPERTY),
            Some("hsl(200, 70%, 40%)")
        );

        // sixth target wraps to the first color
        let sixth = root
            .find(&|el: &Element| el.is("p") && el.text_content() == "d")
            .unwrap();
        assert_eq!(
            sixth.style_property(GRADIENT_COLOR_PROPERTY),
            Some("hsl(200, 70%, 40%)")
        );
    }

    #[test]
    fn test_skips_code_and_empty() {
        let mut root = sample();
        apply_gradient(&mut root, GradientTheme::Mint, true);

        let in_pre = root.find_tag("pre").and_then(|pre| pre.find_tag("p")).unwrap();
        assert!(!in_pre.has_class(GRADIENT_CLASS));

        let empty = root
            .find(&|el: &Element| el.is("p") && el.text_content() == " ")
            .unwrap();
        assert!(!empty.has_class(GRADIENT_CLASS));
    }

    #[test]
    fn test_dark_palette() {
        let mut root = parse_document("<p>x</p>");
        apply_gradient(&mut root, GradientTheme::Ocean, true);
        let p = root.find_tag("p").unwrap();
        assert_eq!(
            p.style_property(GRADIENT_COLOR_PROPERTY),
            Some("hsl(200, 80%, 75%)")
        );
    }

    #[test]
    fn test_none_and_unknown_remove() {
        let mut root = sample();
        apply_gradient(&mut root, GradientTheme::Berry, false);
        assert_eq!(apply_gradient(&mut root, GradientTheme::None, false), 0);
        assert_eq!(root.count(&|el: &Element| el.has_class(GRADIENT_CLASS)), 0);

        apply_gradient(&mut root, GradientTheme::Berry, false);
        assert_eq!(apply_gradient_named(&mut root, "neon", false), 0);
        assert_eq!(root.count(&|el: &Element| !el.style.is_empty()), 0);
    }
}
