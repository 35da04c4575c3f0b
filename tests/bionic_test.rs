//! Integration tests for bionic segmentation.

use bionic_preview::bionic::{
    bold_length, process_text, process_word, BionicSegmenter, BoldFormula, FixationLevel, Segment,
};
use bionic_preview::Error;

const BOLD: &str = r#"<b class="bionic-bold">"#;

#[test]
fn test_bold_length_within_word() {
    for fixation in 1..=5 {
        for len in 1..=40 {
            let bold = bold_length(len, fixation);
            assert!(bold >= 1, "len {} fixation {}", len, fixation);
            assert!(bold <= len, "len {} fixation {}", len, fixation);
        }
    }
}

#[test]
fn test_bold_length_monotonic_in_fixation() {
    for len in 1..=40 {
        let lengths: Vec<usize> = (1..=5).map(|f| bold_length(len, f)).collect();
        assert!(lengths.windows(2).all(|w| w[0] <= w[1]), "len {}", len);
    }
}

#[test]
fn test_bold_length_values() {
    assert_eq!(bold_length(0, 3), 0);
    assert_eq!(bold_length(1, 1), 1);
    assert_eq!(bold_length(5, 3), 2);
    assert_eq!(bold_length(12, 5), 10);
    assert_eq!(bold_length(6, 5), 5);
    // out-of-range fixation is clamped
    assert_eq!(bold_length(10, 0), bold_length(10, 1));
    assert_eq!(bold_length(10, 9), bold_length(10, 5));
}

#[test]
fn test_legacy_formula_bolds_more() {
    let level = FixationLevel::new(3).unwrap();
    assert_eq!(BoldFormula::TextVide.bold_length(4, level), 2);
    assert_eq!(BoldFormula::Legacy.bold_length(4, level), 3);
    for len in 1..=30 {
        assert!(
            BoldFormula::Legacy.bold_length(len, level)
                >= BoldFormula::TextVide.bold_length(len, level)
        );
    }
}

#[test]
fn test_process_word_edge_cases() {
    assert_eq!(process_word("", 3), "");
    assert_eq!(process_word(" ", 3), " ");
    assert_eq!(process_word("\t\n", 1), "\t\n");
    assert_eq!(process_word("...", 3), "...");
    assert_eq!(process_word("a", 3), format!("{}a</b>", BOLD));
}

#[test]
fn test_process_word_escapes_content() {
    for fixation in 1..=5 {
        let html = process_word("<b>", fixation);
        let stripped = html
            .replace(BOLD, "")
            .replace("</b>", "")
            .replace(r#"<span class="bionic-dim">"#, "")
            .replace("</span>", "");
        assert!(!stripped.contains('<'), "{}", html);
        assert!(!stripped.contains('>'), "{}", html);
    }
}

#[test]
fn test_process_word_unicode() {
    assert_eq!(
        process_word("naïve", 3),
        format!(r#"{}na</b><span class="bionic-dim">ïve</span>"#, BOLD)
    );
}

#[test]
fn test_combining_mark_stays_with_base() {
    // decomposed "é": the split after `e` moves past the accent
    assert_eq!(
        process_word("e\u{301}", 3),
        format!("{}e\u{301}</b>", BOLD)
    );
    assert_eq!(
        process_word("e\u{301}x", 1),
        format!("{}e\u{301}</b><span class=\"bionic-dim\">x</span>", BOLD)
    );
}

#[test]
fn test_process_text_keeps_whitespace() {
    assert_eq!(process_text("", 3), "");
    let html = process_text("a  now\n\tok", 3);
    assert!(html.contains("</b>  <b"));
    assert!(html.contains("\n\t<b"));
}

#[test]
fn test_process_text_punctuation_attached() {
    assert_eq!(
        process_text("Hi, there", 3),
        format!(
            r#"{}H</b><span class="bionic-dim">i,</span> {}th</b><span class="bionic-dim">ere</span>"#,
            BOLD, BOLD
        )
    );
}

#[test]
fn test_segmenter_segments() {
    let segmenter = BionicSegmenter::new(FixationLevel::clamped(2));
    let segments: Vec<Segment> = segmenter.segments("one -- two").collect();
    assert_eq!(
        segments,
        vec![
            Segment::Word {
                bold: "o",
                dim: "ne"
            },
            Segment::Whitespace(" "),
            Segment::Plain("--"),
            Segment::Whitespace(" "),
            Segment::Word {
                bold: "t",
                dim: "wo"
            },
        ]
    );
    let text: String = segments.iter().map(Segment::text).collect();
    assert_eq!(text, "one -- two");
}

#[test]
fn test_fixation_level_bounds() {
    assert!(matches!(FixationLevel::new(0), Err(Error::InvalidFixation(0))));
    assert!(FixationLevel::new(6).is_err());
    assert_eq!(FixationLevel::all().count(), 5);
    assert_eq!(FixationLevel::default().get(), 3);

    let parsed: FixationLevel = serde_json::from_str("4").unwrap();
    assert_eq!(parsed.get(), 4);
    assert!(serde_json::from_str::<FixationLevel>("7").is_err());
}
