//! Visible text of a pruned subtree.

use dom_query::NodeRef;

use super::is_unlikely;
use super::prune::PrunedTree;
use crate::dom::{self, Boundary, TextBuffer, NON_RENDERED_TAGS};
use crate::patterns::PatternSet;

/// Concatenated visible text under `node`, skipping pruned elements and
/// hidden or caption subtrees.
///
/// Elements other than inline formatting tags separate words: a single space
/// is put between the text before and after their boundaries unless
/// whitespace is already there. Only a link boundary lets closing
/// punctuation attach to the preceding word.
#[must_use]
pub fn visible_text(pruned: &PrunedTree, node: &NodeRef, patterns: &PatternSet) -> String {
    let mut walker = VisibleText {
        pruned,
        patterns,
        buf: TextBuffer::new(),
    };
    walker.walk(node);
    walker.buf.into_string()
}

struct VisibleText<'t, 'a> {
    pruned: &'t PrunedTree<'a>,
    patterns: &'t PatternSet,
    buf: TextBuffer,
}

impl VisibleText<'_, '_> {
    fn walk(&mut self, node: &NodeRef) {
        for child in node.children_it(false) {
            if child.is_text() {
                self.buf.push_text(&child.text());
                continue;
            }
            if !child.is_element() {
                continue;
            }
            if self.pruned.is_pruned(&child) {
                self.buf.mark(Boundary::Block);
                continue;
            }
            if is_unlikely(&child, self.patterns) {
                continue;
            }

            let tag = dom::tag_name(&child);
            if NON_RENDERED_TAGS.contains(&tag.as_str()) {
                continue;
            }

            let boundary = Boundary::of(&tag);
            self.buf.mark(boundary);
            self.walk(&child);
            self.buf.mark(boundary);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(html: &str, sel: &str) -> String {
        let doc = dom::parse(html);
        let root = doc.select(sel).nodes()[0];
        let pruned = PrunedTree::unpruned(root);
        visible_text(&pruned, &root, &PatternSet::default())
    }

    #[test]
    fn links_separate_words() {
        assert_eq!(text_of("<div>aaa <a>bbb</a>ccc</div>", "div"), "aaa bbb ccc");
    }

    #[test]
    fn inline_formatting_joins_words() {
        assert_eq!(text_of("<p>un<b>believ</b>able</p>", "p"), "unbelievable");
    }

    #[test]
    fn blocks_and_breaks_separate_words() {
        assert_eq!(
            text_of("<div><p>one</p><p>two</p>three<br>four</div>", "div"),
            "one two three four"
        );
    }

    #[test]
    fn punctuation_does_not_attach_across_blocks() {
        assert_eq!(
            text_of("<div><p>Version 2</p><p>.5 release notes follow</p></div>", "div"),
            "Version 2 .5 release notes follow"
        );
        assert_eq!(
            text_of("<table><tr><td>Growth</td><td>%</td></tr></table>", "table"),
            "Growth %"
        );
    }

    #[test]
    fn punctuation_attaches_after_links() {
        assert_eq!(text_of("<p>see <a>this</a>.</p>", "p"), "see this.");
    }

    #[test]
    fn hidden_and_caption_subtrees_are_skipped() {
        let html = r#"<div>shown <span style="display:none">secret</span><p class="wp-caption">cap</p><em class="visibility:hidden">gone</em>end</div>"#;
        assert_eq!(text_of(html, "div"), "shown end");
    }

    #[test]
    fn scripts_are_not_text() {
        assert_eq!(text_of("<div>a<script>var x = 1;</script></div>", "div"), "a");
    }
}
