// HTML rendering of fetched pages

use crate::id::PageId;
use htmlize::{escape_attribute, escape_text};
use htmlparity_fetch::{Block, BlockKind, PageTree};

/// Stylesheet the reference exporter embeds in every page.
const EXPORT_STYLE: &str = "html{-webkit-print-color-adjust:exact}*{box-sizing:border-box}\
.page{max-width:900px;margin:0 auto}\
.page-title{font-size:2.5rem;font-weight:700;margin-top:0;margin-bottom:.75em}\
.page-body{white-space:pre-wrap}\
.link-to-page{margin:1em 0;padding:0}\
.indented{padding-left:1.5em}\
.code{padding:1.5em 2em;background:rgba(135,131,120,.15)}\
.checkbox-on{background:#2eaadc}.checkbox-off{box-shadow:inset 0 0 0 1px rgba(55,53,47,.6)}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub file_name: String,
    pub html: Vec<u8>,
}

pub trait Renderer {
    /// Render one page. `compat` reproduces the reference exporter's quirks.
    fn render(&self, page: &PageTree, compat: bool) -> RenderedPage;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, page: &PageTree, compat: bool) -> RenderedPage {
        let id = PageId::parse(page.id());
        let file_name = html_file_name(page.title(), &id);

        let title = escape_text(page.title());
        let mut html = String::new();
        html.push_str("<html><head>");
        if compat {
            html.push_str(
                r#"<meta http-equiv="Content-Type" content="text/html; charset=utf-8"/>"#,
            );
        } else {
            html.push_str(r#"<meta charset="utf-8"/>"#);
        }
        html.push_str(&format!("<title>{}</title>", title));
        if compat {
            html.push_str(&format!("<style>{}</style>", EXPORT_STYLE));
        }
        html.push_str("</head><body>");
        html.push_str(&format!(
            r#"<article id="{}" class="page sans"><header><h1 class="page-title">{}</h1></header><div class="page-body">"#,
            id.dashed(),
            title
        ));
        for block in &page.root.children {
            render_block(&mut html, block, compat);
        }
        html.push_str("</div></article></body></html>");

        RenderedPage {
            file_name,
            html: html.into_bytes(),
        }
    }
}

/// File name the exporter uses for a page: `"<title> <id>.html"`, or
/// `"<id>.html"` for untitled pages.
pub fn html_file_name(title: &str, id: &PageId) -> String {
    let title = sanitize_title(title);
    if title.is_empty() {
        format!("{}.html", id)
    } else {
        format!("{} {}.html", title, id)
    }
}

fn sanitize_title(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => ' ',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn href_escape(file_name: &str) -> String {
    escape_attribute(&file_name.replace('%', "%25").replace(' ', "%20")).into_owned()
}

fn render_block(out: &mut String, block: &Block, compat: bool) {
    let id = PageId::parse(&block.id).dashed();
    let text = escape_text(block.title.as_str());

    match block.kind {
        BlockKind::Page => {
            let sub_id = PageId::parse(&block.id);
            if compat {
                out.push_str(&format!(
                    r#"<figure id="{}" class="link-to-page"><a href="{}">{}</a></figure>"#,
                    id,
                    href_escape(&html_file_name(&block.title, &sub_id)),
                    text
                ));
            } else {
                out.push_str(&format!(
                    r#"<div class="link-to-page"><a href="{}.html">{}</a></div>"#,
                    sub_id, text
                ));
            }
            // sub-page content is rendered on its own page
            return;
        }
        BlockKind::Text => {
            if block.title.is_empty() && !compat {
                render_indented(out, &block.children, compat);
                return;
            }
            out.push_str(&format!(r#"<p id="{}" class="">{}</p>"#, id, text));
        }
        BlockKind::Header => {
            out.push_str(&format!(r#"<h1 id="{}" class="">{}</h1>"#, id, text));
        }
        BlockKind::SubHeader => {
            out.push_str(&format!(r#"<h2 id="{}" class="">{}</h2>"#, id, text));
        }
        BlockKind::SubSubHeader => {
            out.push_str(&format!(r#"<h3 id="{}" class="">{}</h3>"#, id, text));
        }
        BlockKind::BulletedList | BlockKind::NumberedList => {
            let (tag, class) = if block.kind == BlockKind::BulletedList {
                ("ul", "bulleted-list")
            } else {
                ("ol", "numbered-list")
            };
            out.push_str(&format!(
                r#"<{} id="{}" class="{}"><li>{}"#,
                tag, id, class, text
            ));
            for child in &block.children {
                render_block(out, child, compat);
            }
            out.push_str(&format!("</li></{}>", tag));
            return;
        }
        BlockKind::ToDo => {
            let state = if block.checked { "checked" } else { "unchecked" };
            let checkbox = if block.checked { "on" } else { "off" };
            out.push_str(&format!(
                r#"<ul id="{}" class="to-do-list"><li><div class="checkbox checkbox-{}"></div> <span class="to-do-children-{}">{}</span>"#,
                id, checkbox, state, text
            ));
            render_indented(out, &block.children, compat);
            out.push_str("</li></ul>");
            return;
        }
        BlockKind::Toggle => {
            out.push_str(&format!(
                r#"<ul id="{}" class="toggle"><li><details open=""><summary>{}</summary>"#,
                id, text
            ));
            for child in &block.children {
                render_block(out, child, compat);
            }
            out.push_str("</details></li></ul>");
            return;
        }
        BlockKind::Quote => {
            out.push_str(&format!(
                r#"<blockquote id="{}" class="">{}</blockquote>"#,
                id, text
            ));
        }
        BlockKind::Code => {
            let language = block.language.as_deref().unwrap_or("plain text");
            out.push_str(&format!(
                r#"<pre id="{}" class="code"><code class="language-{}">{}</code></pre>"#,
                id,
                escape_attribute(language.replace(' ', "-").as_str()),
                text
            ));
        }
        BlockKind::Divider => {
            out.push_str(&format!(r#"<hr id="{}"/>"#, id));
        }
        BlockKind::Unsupported => {
            if compat {
                out.push_str(&format!(r#"<div id="{}" class="unsupported"></div>"#, id));
            }
        }
    }

    render_indented(out, &block.children, compat);
}

fn render_indented(out: &mut String, children: &[Block], compat: bool) {
    if children.is_empty() {
        return;
    }
    out.push_str(r#"<div class="indented">"#);
    for child in children {
        render_block(out, child, compat);
    }
    out.push_str("</div>");
}
