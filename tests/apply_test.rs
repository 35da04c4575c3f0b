//! Integration tests for applying bionic emphasis and gradients to pages.

use bionic_preview::apply::{
    apply_bionic, apply_gradient, apply_gradient_named, remove_bionic, remove_gradient,
    BionicOptions, DIM_OPACITY_PROPERTY, GRADIENT_CLASS, GRADIENT_COLOR_PROPERTY, WRAPPER_CLASS,
};
use bionic_preview::model::Element;
use bionic_preview::parser::parse_document;
use bionic_preview::theme::GradientTheme;
use bionic_preview::{parse, FixationLevel};

fn wrappers(root: &Element) -> usize {
    root.count(&|el: &Element| el.has_class(WRAPPER_CLASS))
}

#[test]
fn test_skips_excluded_subtrees() {
    let mut root = parse_document(
        "<p>Read this</p>\
         <pre><span>keep <b>raw</b></span></pre>\
         <script>var x = 1;</script>\
         <svg><text>icon</text></svg>\
         <p>and <kbd>Ctrl</kbd> <code>x</code></p>",
    );
    let wrapped = apply_bionic(&mut root, &BionicOptions::new());
    // "Read this", "and "
    assert_eq!(wrapped, 2);

    let html = root.to_html();
    assert!(html.contains("<pre><span>keep <b>raw</b></span></pre>"));
    assert!(html.contains("<script>var x = 1;</script>"));
    assert!(html.contains("<kbd>Ctrl</kbd>"));
    assert!(html.contains("<code>x</code>"));
}

#[test]
fn test_whitespace_only_text_untouched() {
    let mut root = parse_document("<p>a</p>\n  \n<p>b</p>");
    assert_eq!(apply_bionic(&mut root, &BionicOptions::new()), 2);
    assert_eq!(wrappers(&root), 2);
}

#[test]
fn test_apply_twice_does_not_double_wrap() {
    let mut root = parse_document("<article><p>Some words here</p></article>");
    apply_bionic(&mut root, &BionicOptions::new());
    let once = root.to_html();

    assert_eq!(apply_bionic(&mut root, &BionicOptions::new()), 0);
    assert_eq!(root.to_html(), once);
}

#[test]
fn test_remove_restores_markup() {
    let source = "<h1>Title &amp; more</h1><p>Body <em>text</em> with <a href=\"#x\">link</a>.</p>";
    let mut root = parse_document(source);
    let before = root.clone();

    let options = BionicOptions::new()
        .with_fixation(FixationLevel::clamped(5))
        .with_dim_opacity(0.2);
    apply_bionic(&mut root, &options);
    assert_eq!(root.style_property(DIM_OPACITY_PROPERTY), Some("0.2"));
    assert_ne!(root, before);

    remove_bionic(&mut root);
    assert_eq!(root, before);
    assert_eq!(root.style_property(DIM_OPACITY_PROPERTY), None);
}

#[test]
fn test_bionic_on_converted_markdown() {
    let html = parse("# Reading\n\nFast `code` here");
    let mut root = parse_document(&html);
    apply_bionic(&mut root, &BionicOptions::new());

    let out = root.to_html();
    assert!(out.contains(r#"<b class="bionic-bold">Rea</b><span class="bionic-dim">ding</span>"#));
    assert!(out.contains("<code>code</code>"));
}

#[test]
fn test_gradient_round_robin_across_document() {
    let html = parse("# One\n\npara\n\n- a\n- b\n\n> quote\n\n| h |\n|---|\n| c |");
    let mut root = parse_document(&html);
    let colors = GradientTheme::Forest.adjusted_colors(false);

    // h1, p, li, li, blockquote, th, td
    assert_eq!(apply_gradient(&mut root, GradientTheme::Forest, false), 7);

    let tinted: Vec<String> = {
        let mut out = Vec::new();
        collect_colors(&root, &mut out);
        out
    };
    assert_eq!(tinted.len(), 7);
    for (i, color) in tinted.iter().enumerate() {
        assert_eq!(color, &colors[i % colors.len()].to_string());
    }
}

fn collect_colors(el: &Element, out: &mut Vec<String>) {
    if el.has_class(GRADIENT_CLASS) {
        if let Some(color) = el.style_property(GRADIENT_COLOR_PROPERTY) {
            out.push(color.to_string());
        }
    }
    for child in el.children.iter().filter_map(|n| n.as_element()) {
        collect_colors(child, out);
    }
}

#[test]
fn test_gradient_and_bionic_together() {
    let mut root = parse_document("<p>alpha beta</p><li>gamma</li>");
    apply_bionic(&mut root, &BionicOptions::new());
    apply_gradient_named(&mut root, "twilight", true);
    assert_eq!(root.count(&|el: &Element| el.has_class(GRADIENT_CLASS)), 2);

    remove_gradient(&mut root);
    remove_bionic(&mut root);
    assert_eq!(root.to_html(), "<body><p>alpha beta</p><li>gamma</li></body>");
}
