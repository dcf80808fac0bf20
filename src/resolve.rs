use crate::error::SplitError;
use crate::pdf::BookmarkNode;
use std::ops::Range;

/// One output file to produce: a bookmark title and the pages under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitUnit {
    pub title: String,
    pub depth: u32,
    /// Zero-based, half-open. May be empty.
    pub pages: Range<u32>,
}

impl SplitUnit {
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Check a user supplied depth. `None` means no limit.
pub fn validate_depth(depth: Option<i64>) -> Result<Option<u32>, SplitError> {
    match depth {
        None => Ok(None),
        Some(d) if d >= 1 => Ok(Some(u32::try_from(d).unwrap_or(u32::MAX))),
        Some(d) => Err(SplitError::InvalidDepth(d)),
    }
}

fn retains(max_depth: Option<u32>, depth: u32) -> bool {
    max_depth.map_or(true, |max| depth <= max)
}

/// Turn a bookmark forest into split units, in reading order.
///
/// Every bookmark at depth `<= max_depth` becomes one unit running from its
/// own page up to the start of the next bookmark at the same or a shallower
/// depth (or the end of the document). Deeper bookmarks are folded into the
/// range of their retained ancestor. Parents and children overlap: a
/// parent's range covers all of its children.
pub fn resolve(
    forest: Vec<BookmarkNode>,
    max_depth: Option<u32>,
    total_pages: u32,
) -> Vec<SplitUnit> {
    let mut units = Vec::new();
    resolve_siblings(forest, max_depth, total_pages, total_pages, &mut units);
    units
}

fn resolve_siblings(
    nodes: Vec<BookmarkNode>,
    max_depth: Option<u32>,
    total_pages: u32,
    inherited_end: u32,
    units: &mut Vec<SplitUnit>,
) {
    let bounds = sibling_bounds(&nodes, inherited_end, total_pages);

    for (node, pages) in nodes.into_iter().zip(bounds) {
        if !retains(max_depth, node.depth) {
            continue;
        }

        let BookmarkNode {
            title,
            depth,
            children,
            ..
        } = node;
        let end = pages.end;

        units.push(SplitUnit {
            title,
            depth,
            pages,
        });

        if retains(max_depth, depth + 1) {
            resolve_siblings(children, max_depth, total_pages, end, units);
        }
    }
}

/// Page ranges for one list of siblings that must end by `inherited_end`.
///
/// Walks right to left so each node's end is its next sibling's start.
/// A bookmark without a resolvable page starts where it ends, so it takes
/// no pages and leaves its previous sibling's range untouched.
fn sibling_bounds(
    nodes: &[BookmarkNode],
    inherited_end: u32,
    total_pages: u32,
) -> Vec<Range<u32>> {
    let mut bounds = vec![0..0; nodes.len()];
    let mut boundary = inherited_end;

    for (i, node) in nodes.iter().enumerate().rev() {
        let start = node.start_page.map_or(boundary, |page| page.min(total_pages));
        if boundary < start {
            log::warn!(
                "Bookmark '{}' starts at page {} after the next section begins at page {}; it will be empty",
                node.title,
                start + 1,
                boundary + 1
            );
        }
        bounds[i] = start..boundary.max(start);
        boundary = start;
    }

    bounds
}
