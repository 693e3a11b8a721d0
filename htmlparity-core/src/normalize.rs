// HTML pretty-printing used for the second, tolerant comparison

use htmlize::{escape_attribute, escape_text};
use scraper::{ElementRef, Html, Node};

const INDENT: &str = "  ";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose text content is kept byte for byte.
const RAW_ELEMENTS: &[&str] = &["pre", "textarea", "script", "style"];

/// Re-serialize an HTML document in a canonical, indented form.
///
/// Insignificant differences disappear: attribute order and quoting,
/// whitespace between tags, runs of whitespace inside text. Applying it to
/// its own output returns the same bytes.
pub fn normalize_html(data: &[u8]) -> Vec<u8> {
    let source = String::from_utf8_lossy(data);
    let document = Html::parse_document(&source);

    let mut out = String::new();
    for child in document.tree.root().children() {
        write_node(&mut out, child.value(), ElementRef::wrap(child), 0);
    }
    out.into_bytes()
}

fn write_node(out: &mut String, node: &Node, element: Option<ElementRef<'_>>, depth: usize) {
    match node {
        Node::Doctype(doctype) => {
            out.push_str(&format!("<!DOCTYPE {}>\n", doctype.name()));
        }
        Node::Comment(comment) => {
            push_line(out, depth, &format!("<!--{}-->", comment.trim()));
        }
        Node::Text(text) => {
            let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !collapsed.is_empty() {
                push_line(out, depth, &escape_text(collapsed.as_str()));
            }
        }
        Node::Element(_) => {
            if let Some(element) = element {
                write_element(out, element, depth);
            }
        }
        _ => {}
    }
}

fn write_element(out: &mut String, element: ElementRef<'_>, depth: usize) {
    let name = element.value().name();
    let open_tag = open_tag(element);

    if VOID_ELEMENTS.contains(&name) {
        push_line(out, depth, &open_tag);
        return;
    }

    if RAW_ELEMENTS.contains(&name) {
        // script and style hold raw text; pre and textarea hold escaped text
        let escape = name == "pre" || name == "textarea";
        let mut raw = String::new();
        write_raw_children(&mut raw, element, escape);
        // the parser drops one newline right after <pre> and <textarea>
        let lead = if escape && raw.starts_with('\n') { "\n" } else { "" };
        push_line(out, depth, &format!("{}{}{}</{}>", open_tag, lead, raw, name));
        return;
    }

    if !element.children().any(|child| has_content(child.value())) {
        push_line(out, depth, &format!("{}</{}>", open_tag, name));
        return;
    }

    push_line(out, depth, &open_tag);
    for child in element.children() {
        write_node(out, child.value(), ElementRef::wrap(child), depth + 1);
    }
    push_line(out, depth, &format!("</{}>", name));
}

/// Serialize the content of a raw element on one line, nested markup
/// included, without touching its whitespace.
fn write_raw_children(out: &mut String, element: ElementRef<'_>, escape: bool) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) if escape => out.push_str(&escape_text(&**text)),
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(nested) = ElementRef::wrap(child) {
                    let name = nested.value().name();
                    out.push_str(&open_tag(nested));
                    if !VOID_ELEMENTS.contains(&name) {
                        write_raw_children(out, nested, escape);
                        out.push_str(&format!("</{}>", name));
                    }
                }
            }
            _ => {}
        }
    }
}

fn open_tag(element: ElementRef<'_>) -> String {
    let mut attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    attrs.sort();

    let mut tag = format!("<{}", element.value().name());
    for (name, value) in attrs {
        tag.push_str(&format!(" {}=\"{}\"", name, escape_attribute(value)));
    }
    tag.push('>');
    tag
}

fn has_content(node: &Node) -> bool {
    match node {
        Node::Text(text) => !text.trim().is_empty(),
        Node::Element(_) | Node::Comment(_) => true,
        _ => false,
    }
}

fn push_line(out: &mut String, depth: usize, line: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(line);
    out.push('\n');
}
