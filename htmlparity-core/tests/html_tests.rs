// Tests for rendering and normalization

use htmlparity_core::id::PageId;
use htmlparity_core::normalize::normalize_html;
use htmlparity_core::render::{HtmlRenderer, Renderer, html_file_name};
use htmlparity_fetch::{Block, BlockKind, PageTree};

fn sample_page() -> PageTree {
    PageTree::new(
        Block::new("0367c2db-381a-4f8b-9ce3-60f388a6b2e3", BlockKind::Page, "Test: pages").with_children(vec![
            Block::new("b1", BlockKind::Header, "Intro"),
            Block::new("b2", BlockKind::Text, "Fish & chips <3"),
            Block::new("b3", BlockKind::Text, ""),
            Block::new("25b6ac21d67e4a8ea3b010bcb7d4fc43", BlockKind::Page, "Child page"),
            Block::new("b4", BlockKind::BulletedList, "item")
                .with_children(vec![Block::new("b5", BlockKind::Text, "nested")]),
        ]),
    )
}

// ============================================================================
// Rendering Tests
// ============================================================================

#[test]
fn test_html_file_name() {
    let id = PageId::parse("0367c2db-381a-4f8b-9ce3-60f388a6b2e3");
    assert_eq!(
        html_file_name("Test: pages", &id),
        "Test pages 0367c2db381a4f8b9ce360f388a6b2e3.html"
    );
    assert_eq!(
        html_file_name("", &id),
        "0367c2db381a4f8b9ce360f388a6b2e3.html"
    );
}

#[test]
fn test_render_uses_export_file_name() {
    let rendered = HtmlRenderer.render(&sample_page(), true);
    assert_eq!(
        rendered.file_name,
        "Test pages 0367c2db381a4f8b9ce360f388a6b2e3.html"
    );
}

#[test]
fn test_render_escapes_text() {
    let rendered = HtmlRenderer.render(&sample_page(), true);
    let html = String::from_utf8(rendered.html).unwrap();

    assert!(html.contains("Fish &amp; chips &lt;3"));
    assert!(html.contains("<title>Test: pages</title>"));
}

#[test]
fn test_render_compat_links_sub_pages_by_file_name() {
    let rendered = HtmlRenderer.render(&sample_page(), true);
    let html = String::from_utf8(rendered.html).unwrap();

    assert!(html.contains(r#"class="link-to-page""#));
    assert!(html.contains(r#"href="Child%20page%2025b6ac21d67e4a8ea3b010bcb7d4fc43.html""#));
    assert!(html.contains("<style>"));
}

#[test]
fn test_render_without_compat() {
    let rendered = HtmlRenderer.render(&sample_page(), false);
    let html = String::from_utf8(rendered.html).unwrap();

    assert!(html.contains(r#"href="25b6ac21d67e4a8ea3b010bcb7d4fc43.html""#));
    assert!(!html.contains("<style>"));
    // empty text blocks are dropped outside compat mode
    assert_eq!(html.matches("<p ").count(), 2);
}

#[test]
fn test_render_is_deterministic() {
    let page = sample_page();
    assert_eq!(HtmlRenderer.render(&page, true), HtmlRenderer.render(&page, true));
}

// ============================================================================
// Normalization Tests
// ============================================================================

#[test]
fn test_normalize_ignores_quote_style() {
    let a = br#"<html><body><p class="x" id="1">hi</p></body></html>"#;
    let b = br#"<html><body><p class='x' id=1>hi</p></body></html>"#;

    assert_ne!(a.as_slice(), b.as_slice());
    assert_eq!(normalize_html(a), normalize_html(b));
}

#[test]
fn test_normalize_ignores_attribute_order() {
    let a = br#"<div id="a" class="b"></div>"#;
    let b = br#"<div class="b" id="a"></div>"#;
    assert_eq!(normalize_html(a), normalize_html(b));
}

#[test]
fn test_normalize_ignores_whitespace_between_tags() {
    let a = b"<ul><li>one</li><li>two   words</li></ul>";
    let b = b"<ul>\n    <li>one</li>\n    <li>two\nwords</li>\n</ul>\n";
    assert_eq!(normalize_html(a), normalize_html(b));
}

#[test]
fn test_normalize_keeps_text_differences() {
    let a = b"<p>hello</p>";
    let b = b"<p>hallo</p>";
    assert_ne!(normalize_html(a), normalize_html(b));
}

#[test]
fn test_normalize_preserves_pre_whitespace() {
    let a = b"<pre>a  b</pre>";
    let b = b"<pre>a b</pre>";
    assert_ne!(normalize_html(a), normalize_html(b));
}

#[test]
fn test_normalize_output_is_indented() {
    let out = normalize_html(b"<!DOCTYPE html><html><head></head><body><p>hi</p></body></html>");
    let out = String::from_utf8(out).unwrap();

    assert_eq!(
        out,
        "<!DOCTYPE html>\n<html>\n  <head></head>\n  <body>\n    <p>\n      hi\n    </p>\n  </body>\n</html>\n"
    );
}

#[test]
fn test_normalize_keeps_leading_newline_in_pre() {
    let once = normalize_html(b"<html><body><pre>\n\nfoo</pre></body></html>");
    let twice = normalize_html(&once);

    assert!(String::from_utf8_lossy(&once).contains("<pre>\n\nfoo</pre>"));
    assert_eq!(once, twice);
}

#[test]
fn test_normalize_keeps_leading_newline_in_textarea() {
    let once = normalize_html(b"<textarea>\n\nbar</textarea>");
    assert_eq!(normalize_html(&once), once);
}

#[test]
fn test_normalize_pre_markup_differs_from_escaped_text() {
    let markup = normalize_html(br#"<pre><code id="x" class="c">a &lt; b</code></pre>"#);
    let text = normalize_html(b"<pre>&lt;code&gt;a &lt; b&lt;/code&gt;</pre>");

    assert_ne!(markup, text);
    let out = String::from_utf8(markup.clone()).unwrap();
    assert!(out.contains(r#"<pre><code class="c" id="x">a &lt; b</code></pre>"#));
    assert_eq!(normalize_html(&markup), markup);
}

#[test]
fn test_normalize_void_elements() {
    let out = String::from_utf8(normalize_html(b"<p>a<br/>b</p><hr>")).unwrap();
    assert!(out.contains("<br>\n"));
    assert!(!out.contains("</br>"));
    assert!(!out.contains("</hr>"));
}

#[test]
fn test_normalize_is_idempotent() {
    let rendered = HtmlRenderer.render(&sample_page(), true);
    let once = normalize_html(&rendered.html);
    assert_eq!(normalize_html(&once), once);
}

#[test]
fn test_normalize_invalid_utf8_does_not_panic() {
    let out = normalize_html(&[0x3c, 0x70, 0x3e, 0xff, 0xfe, 0x3c, 0x2f, 0x70, 0x3e]);
    assert!(!out.is_empty());
}
