// src/wiki/html.rs
// =============================================================================
// This module extracts readable text from rendered Wikipedia article HTML.
//
// The parse API hands us the article as HTML. For word counting we only want
// the prose, so we:
// - Select block elements that hold text (paragraphs, headings, list items)
// - Skip blocks nested inside another selected block (no double counting)
// - Drop text inside footnote markers ([1]), "[edit]" links, <style>, <script>
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// =============================================================================

use scraper::{ElementRef, Html, Selector};

/// Elements whose text we collect
const TEXT_BLOCKS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "dd", "dt", "blockquote",
];

/// Wrappers of nested blocks inside a text block
const LIST_CONTAINERS: &[&str] = &["ul", "ol", "dl", "div", "table"];

// Extracts the article prose from HTML, one block per line
//
// Example:
//   html = "<p>Hello <b>world</b><sup class='reference'>[1]</sup></p>"
//   result = "Hello world"
pub fn extract_article_text(html: &str) -> String {
    let document = Html::parse_fragment(html);

    // The selector is a constant, so parsing it cannot fail at runtime
    let selector = Selector::parse(&TEXT_BLOCKS.join(", ")).unwrap();

    let mut blocks = Vec::new();

    for element in document.select(&selector) {
        // A <p> inside an <li> is covered when we read the <li>
        if has_block_ancestor(element) {
            continue;
        }

        let text = block_text(element);
        let text = text.trim();
        if !text.is_empty() {
            blocks.push(text.to_string());
        }
    }

    blocks.join("\n")
}

// Collects all text below an element, skipping excluded subtrees
//
// Runs of whitespace collapse to a single space, so "New York<br>Brooklyn"
// reads as three words instead of "YorkBrooklyn".
fn block_text(element: ElementRef) -> String {
    let mut text = String::new();
    collect_text(element, &mut text);
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(fragment) = child.value().as_text() {
            out.push_str(fragment);
            continue;
        }

        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        if is_excluded(child) {
            continue;
        }

        let name = child.value().name();
        if name == "br" {
            out.push(' ');
        } else if TEXT_BLOCKS.contains(&name) || LIST_CONTAINERS.contains(&name) {
            // Nested blocks start a new word
            out.push(' ');
            collect_text(child, out);
            out.push(' ');
        } else {
            collect_text(child, out);
        }
    }
}

fn has_block_ancestor(element: ElementRef) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| TEXT_BLOCKS.contains(&ancestor.value().name()))
}

// Footnote markers, edit links and non-prose elements
fn is_excluded(element: ElementRef) -> bool {
    let value = element.value();
    match value.name() {
        "style" | "script" => true,
        "sup" => value.classes().any(|class| class == "reference"),
        "span" => value.classes().any(|class| class == "mw-editsection"),
        _ => false,
    }
}
