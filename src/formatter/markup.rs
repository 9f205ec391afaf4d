//! Markup serialization of a pruned subtree.

use dom_query::NodeRef;

use super::prune::PrunedTree;
use crate::dom;

/// Elements whose text children are written without escaping.
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

/// Outer markup of `node` as seen through `pruned`.
///
/// Pruned descendants are left out. Images rescued from them are written as
/// bare `<img src="...">` in their place.
#[must_use]
pub fn outer_markup(pruned: &PrunedTree, node: &NodeRef) -> String {
    let mut out = String::new();
    write_element(pruned, node, &mut out);
    out
}

/// A bare image element.
#[must_use]
pub fn image_markup(src: &str) -> String {
    format!(r#"<img src="{}">"#, dom::escape_attr(src))
}

fn write_element(pruned: &PrunedTree, node: &NodeRef, out: &mut String) {
    let tag = dom::tag_name(node);

    out.push('<');
    out.push_str(&tag);
    for (name, value) in dom::get_all_attributes(node) {
        out.push(' ');
        out.push_str(&name);
        out.push_str("=\"");
        out.push_str(&dom::escape_attr(&value));
        out.push('"');
    }
    out.push('>');

    if dom::is_void_element(&tag) {
        return;
    }

    let raw = RAW_TEXT_TAGS.contains(&tag.as_str());
    for child in node.children_it(false) {
        if child.is_text() {
            let text = child.text();
            if raw {
                out.push_str(&text);
            } else {
                out.push_str(&dom::escape_text(&text));
            }
        } else if child.is_element() {
            if pruned.is_pruned(&child) {
                for src in pruned.salvaged(&child) {
                    out.push_str(&image_markup(src));
                }
            } else {
                write_element(pruned, &child, out);
            }
        }
    }

    out.push_str("</");
    out.push_str(&tag);
    out.push('>');
}
