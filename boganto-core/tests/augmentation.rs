//! End-to-end checks that the table of contents and the annotated body agree.

use boganto_core::{
    annotate, annotate_with, estimate_read_minutes, extract_headings, extract_headings_with,
    slugify, HeadingLevel, HeadingOptions,
};

const POST: &str = r#"<p>Every winter we pick a shelf of books.</p>
<h2>Why Read in <em>Winter</em>?</h2>
<p>Because it is <strong>cold</strong>.</p>
<blockquote class="pull"><p>A book is a dream you hold in your hands.</p></blockquote>
<h3 class="sub">Fiction &amp; Fantasy</h3>
<img src="/shelf.jpg" alt="A shelf">
<h3>Non-fiction</h3>
<script>console.log("<h2>not a heading?</h2>")</script>
<h2>Chapter 1: The Beginning!</h2>
<p>The end.</p>"#;

fn anchor_ids(html: &str) -> Vec<String> {
    let re = regex::Regex::new(r#"<h[23][^>]*\sid="([^"]*)""#).unwrap();
    re.captures_iter(html).map(|c| c[1].to_string()).collect()
}

#[test]
fn test_entry_count_and_order() {
    let toc = extract_headings(POST);
    let texts: Vec<&str> = toc.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(
        texts,
        [
            "Why Read in Winter?",
            "Fiction & Fantasy",
            "Non-fiction",
            "Chapter 1: The Beginning!",
        ]
    );
    assert_eq!(toc[0].level, HeadingLevel::H2);
    assert_eq!(toc[1].level, HeadingLevel::H3);
}

#[test]
fn test_toc_ids_match_body_anchors_in_order() {
    let toc_ids: Vec<String> = extract_headings(POST).into_iter().map(|e| e.id).collect();
    assert_eq!(anchor_ids(&annotate(POST)), toc_ids);
    assert_eq!(toc_ids[3], "chapter-1-the-beginning");
}

#[test]
fn test_toc_ids_are_slugs_of_their_text() {
    for entry in extract_headings(POST) {
        assert_eq!(entry.id, slugify(&entry.text));
    }
    let attr_trap = r#"<h2 title="see id=intro">Getting Started</h2>"#;
    let toc = extract_headings(attr_trap);
    assert!(annotate(attr_trap).contains(&format!("id=\"{}\"", toc[0].id)));
}

#[test]
fn test_ids_match_with_unique_ids() {
    let options = HeadingOptions {
        unique_ids: true,
        ..Default::default()
    };
    let doc = "<h2>Summary</h2><h3>Summary</h3><h2 id=\"summary-1\">Kept</h2><h2>Summary</h2>";
    let toc_ids: Vec<String> = extract_headings_with(doc, &options)
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(toc_ids, ["summary", "summary-2", "summary-1", "summary-3"]);
    assert_eq!(anchor_ids(&annotate_with(doc, &options)), toc_ids);
}

#[test]
fn test_non_heading_markup_is_unchanged() {
    let annotated = annotate(POST);
    for fragment in [
        r#"<blockquote class="pull"><p>A book is a dream you hold in your hands.</p></blockquote>"#,
        r#"<img src="/shelf.jpg" alt="A shelf">"#,
        "<p>Because it is <strong>cold</strong>.</p>",
        "<p>The end.</p>",
        r#"<script>console.log("<h2>not a heading?</h2>")</script>"#,
    ] {
        assert!(annotated.contains(fragment), "lost {fragment}");
    }

    let without_headings = "<p>Plain <a href=\"#x\">post</a></p>\n<blockquote>Q</blockquote>";
    assert_eq!(annotate(without_headings), without_headings);
}

#[test]
fn test_slug_properties() {
    assert_eq!(slugify("Chapter 1: The Beginning!"), "chapter-1-the-beginning");
    for text in ["Fiction & Fantasy", "  spaced  out ", "Ünïcode Títle", ""] {
        assert_eq!(slugify(text), slugify(text));
    }
}

#[test]
fn test_read_time_examples() {
    assert_eq!(estimate_read_minutes("", 200), 0);
    assert_eq!(
        estimate_read_minutes(&format!("<p>{}</p>", "word ".repeat(200)), 200),
        1
    );
    assert_eq!(
        estimate_read_minutes(&format!("<p>{}</p>", "word ".repeat(401)), 200),
        3
    );
}
