//! Non-destructive pruning.
//!
//! Instead of deleting subtrees from the parsed document, pruning records
//! which elements are gone and which image sources were rescued from them.
//! Rendering then walks the document through this view, so the original tree
//! stays intact for a second extraction pass.

use std::collections::{HashMap, HashSet};

use dom_query::{Matcher, NodeId, NodeRef};

use crate::dom;
use crate::images::analyze_image;
use crate::weights::WeightTable;

/// Position of each kept element among all kept elements under a root,
/// starting at 0. Elements that are not kept have no index.
#[derive(Debug, Clone, Default)]
pub struct ParagraphIndex {
    indices: HashMap<NodeId, usize>,
}

impl ParagraphIndex {
    /// Index `root` and its descendants that match `keep`, in document order.
    #[must_use]
    pub fn build(root: &NodeRef, keep: &Matcher) -> Self {
        let indices = self_and_descendants(root)
            .filter(|node| node.is_match(keep))
            .enumerate()
            .map(|(index, node)| (node.id, index))
            .collect();
        Self { indices }
    }

    /// Index of `id`, if it was matched.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<usize> {
        self.indices.get(&id).copied()
    }

    /// Number of indexed elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

fn self_and_descendants<'a>(node: &NodeRef<'a>) -> impl Iterator<Item = NodeRef<'a>> {
    std::iter::once(*node).chain(node.descendants_it())
}

/// One element (or rescued image) the renderer may emit.
#[derive(Debug, Clone, Copy)]
pub enum Kept<'a, 'p> {
    /// An element of the document matching the keep selector.
    Node(NodeRef<'a>),
    /// A bare image rescued from a pruned element. `parent` is the parent of
    /// the pruned element the image now follows.
    Image {
        /// Element the image is rendered under.
        parent: NodeRef<'a>,
        /// The image's `src`.
        src: &'p str,
    },
}

/// A view of a content root with low-value descendants pruned.
#[derive(Debug, Clone)]
pub struct PrunedTree<'a> {
    root: NodeRef<'a>,
    removed: HashSet<NodeId>,
    salvaged: HashMap<NodeId, Vec<String>>,
}

impl<'a> PrunedTree<'a> {
    /// A view of `root` with nothing pruned.
    #[must_use]
    pub fn unpruned(root: NodeRef<'a>) -> Self {
        Self {
            root,
            removed: HashSet::new(),
            salvaged: HashMap::new(),
        }
    }

    /// Prune the weighted descendants of `root`.
    ///
    /// An element with an entry in `weights` is pruned when its weight is
    /// negative or its text is shorter than the minimum for its paragraph
    /// index. `min_len` maps an optional paragraph index to that minimum.
    /// Images inside a pruned element that are not too small survive as bare
    /// `<img>` elements right after it. The root itself is never pruned.
    pub fn build<F>(
        root: NodeRef<'a>,
        weights: &WeightTable,
        paragraphs: &ParagraphIndex,
        min_len: F,
    ) -> Self
    where
        F: Fn(Option<usize>) -> usize,
    {
        let mut pruned = Self::unpruned(root);

        for item in root.descendants_it().filter(NodeRef::is_element) {
            if !weights.contains(item.id) || pruned.is_removed(&item) {
                continue;
            }

            let weight = weights.get(item.id);
            let text_len = dom::text_len(&item);
            if weight >= 0 && text_len >= min_len(paragraphs.get(item.id)) {
                continue;
            }

            let rescued: Vec<String> = self_and_descendants(&item)
                .filter(|n| n.has_name("img"))
                .filter_map(|img| analyze_image(&img))
                .filter(|image| !image.is_too_small())
                .map(|image| image.source_url)
                .collect();

            tracing::trace!(
                tag = %dom::tag_name(&item),
                weight,
                text_len,
                rescued = rescued.len(),
                "pruning element"
            );

            if !rescued.is_empty() {
                pruned.salvaged.insert(item.id, rescued);
            }
            pruned.removed.insert(item.id);
        }

        tracing::debug!(
            removed = pruned.removed.len(),
            rescued = pruned.salvaged.values().map(Vec::len).sum::<usize>(),
            "pruned content root"
        );
        pruned
    }

    /// The content root.
    #[must_use]
    pub fn root(&self) -> NodeRef<'a> {
        self.root
    }

    /// Whether `node` itself was pruned. Descendants of a pruned element are
    /// not reported; walkers stop at the pruned element.
    #[must_use]
    pub fn is_pruned(&self, node: &NodeRef) -> bool {
        self.removed.contains(&node.id)
    }

    /// Whether `node` or one of its ancestors below the root was pruned.
    #[must_use]
    pub fn is_removed(&self, node: &NodeRef) -> bool {
        if self.removed.is_empty() {
            return false;
        }
        if self.is_pruned(node) {
            return true;
        }
        node.ancestors_it(None)
            .take_while(|a| a.id != self.root.id)
            .any(|a| self.removed.contains(&a.id))
    }

    /// Image sources rescued from the pruned element `node`.
    #[must_use]
    pub fn salvaged(&self, node: &NodeRef) -> &[String] {
        self.salvaged.get(&node.id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of pruned elements.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    /// Elements under the root matching `keep`, in document order, including
    /// the root itself. Rescued images are yielded where they were inserted
    /// when `keep_images` is set.
    #[must_use]
    pub fn kept<'p>(&'p self, keep: &Matcher, keep_images: bool) -> Vec<Kept<'a, 'p>> {
        let mut out = Vec::new();
        if self.root.is_match(keep) {
            out.push(Kept::Node(self.root));
        }
        self.collect_kept(&self.root, keep, keep_images, &mut out);
        out
    }

    fn collect_kept<'p>(
        &'p self,
        node: &NodeRef<'a>,
        keep: &Matcher,
        keep_images: bool,
        out: &mut Vec<Kept<'a, 'p>>,
    ) {
        for child in node.children_it(false).filter(NodeRef::is_element) {
            if self.is_pruned(&child) {
                if keep_images {
                    out.extend(
                        self.salvaged(&child)
                            .iter()
                            .map(|src| Kept::Image { parent: *node, src }),
                    );
                }
                continue;
            }
            if child.is_match(keep) {
                out.push(Kept::Node(child));
            }
            self.collect_kept(&child, keep, keep_images, out);
        }
    }
}
