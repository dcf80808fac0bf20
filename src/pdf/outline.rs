use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::{HashMap, HashSet};

/// One entry of the document outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkNode {
    pub title: String,
    /// Zero-based page the bookmark points at, `None` if its destination
    /// does not resolve to a page of this document.
    pub start_page: Option<u32>,
    /// Nesting level, top-level bookmarks are at depth 1.
    pub depth: u32,
    pub children: Vec<BookmarkNode>,
}

/// Deepest outline level loaded; anything below it is folded into its
/// ancestor. Loading, resolving and dropping all recurse per level.
pub const MAX_OUTLINE_DEPTH: u32 = 256;

/// Maps page object ids to zero-based page indices.
type PageMap = HashMap<ObjectId, u32>;

/// Read the bookmark forest of a document.
///
/// A document without an outline yields an empty forest.
pub fn load_outline(doc: &Document) -> lopdf::Result<Vec<BookmarkNode>> {
    let catalog = doc.catalog()?;

    let outlines = match catalog.get(b"Outlines") {
        Ok(Object::Reference(r)) => match doc.get_dictionary(*r) {
            Ok(d) => d,
            Err(_) => return Ok(Vec::new()),
        },
        Ok(Object::Dictionary(d)) => d,
        _ => return Ok(Vec::new()),
    };

    let first_ref = match outlines.get(b"First") {
        Ok(Object::Reference(r)) => *r,
        _ => return Ok(Vec::new()),
    };

    let page_map = build_page_map(doc);
    let mut seen = HashSet::new();
    Ok(load_siblings(doc, first_ref, &page_map, 1, &mut seen))
}

fn load_siblings(
    doc: &Document,
    first_id: ObjectId,
    page_map: &PageMap,
    depth: u32,
    seen: &mut HashSet<ObjectId>,
) -> Vec<BookmarkNode> {
    let mut nodes = Vec::new();
    let mut current_id = Some(first_id);

    while let Some(id) = current_id {
        if !seen.insert(id) {
            log::warn!(
                "Outline item {} {} R is linked twice, ignoring the rest of its chain",
                id.0,
                id.1
            );
            break;
        }

        let dict = match doc.get_dictionary(id) {
            Ok(d) => d,
            Err(_) => break,
        };

        let title = match dict.get(b"Title") {
            Ok(Object::String(bytes, _)) => decode_pdf_string(bytes),
            _ => String::new(),
        };

        let start_page = destination_page(doc, dict, page_map);
        match start_page {
            Some(page) => {
                log::debug!("Bookmark '{}' (page {}, depth {})", title, page + 1, depth)
            }
            None => log::debug!("Bookmark '{}' (no page, depth {})", title, depth),
        }

        let children = match dict.get(b"First") {
            Ok(Object::Reference(_)) if depth >= MAX_OUTLINE_DEPTH => {
                log::warn!(
                    "Outline nested deeper than {} levels below '{}', ignoring the deeper entries",
                    MAX_OUTLINE_DEPTH,
                    title
                );
                Vec::new()
            }
            Ok(Object::Reference(child_ref)) => {
                load_siblings(doc, *child_ref, page_map, depth + 1, seen)
            }
            _ => Vec::new(),
        };

        nodes.push(BookmarkNode {
            title,
            start_page,
            depth,
            children,
        });

        current_id = match dict.get(b"Next") {
            Ok(Object::Reference(r)) => Some(*r),
            _ => None,
        };
    }

    nodes
}

fn destination_page(doc: &Document, dict: &Dictionary, page_map: &PageMap) -> Option<u32> {
    if let Ok(dest) = dict.get(b"Dest") {
        return resolve_destination(doc, dest, page_map, 0);
    }

    let action = match dict.get(b"A") {
        Ok(Object::Reference(r)) => doc.get_dictionary(*r).ok()?,
        Ok(Object::Dictionary(d)) => d,
        _ => return None,
    };

    match action.get(b"S") {
        Ok(Object::Name(kind)) if kind == b"GoTo" => {
            resolve_destination(doc, action.get(b"D").ok()?, page_map, 0)
        }
        _ => None,
    }
}

// Named destinations may point at further references; cap the chase.
const MAX_DEST_HOPS: u32 = 16;

fn resolve_destination(
    doc: &Document,
    dest: &Object,
    page_map: &PageMap,
    hops: u32,
) -> Option<u32> {
    if hops > MAX_DEST_HOPS {
        return None;
    }
    match dest {
        Object::String(name, _) | Object::Name(name) => {
            resolve_named_destination(doc, name, page_map, hops + 1)
        }
        Object::Array(arr) => page_from_dest_array(arr, page_map),
        // Named destination values may be wrapped as << /D [...] >>
        Object::Dictionary(d) => {
            resolve_destination(doc, d.get(b"D").ok()?, page_map, hops + 1)
        }
        Object::Reference(r) => {
            let obj = doc.get_object(*r).ok()?;
            resolve_destination(doc, obj, page_map, hops + 1)
        }
        _ => None,
    }
}

fn resolve_named_destination(
    doc: &Document,
    name: &[u8],
    page_map: &PageMap,
    hops: u32,
) -> Option<u32> {
    let catalog = doc.catalog().ok()?;

    if let Some(names_dict) = deref_dictionary(doc, catalog.get(b"Names").ok()) {
        if let Ok(Object::Reference(dests_ref)) = names_dict.get(b"Dests") {
            let mut visited = HashSet::new();
            if let Some(dest) = search_name_tree(doc, *dests_ref, name, &mut visited) {
                return resolve_destination(doc, dest, page_map, hops);
            }
        }
    }

    // Legacy /Dests dictionary in the catalog
    if let Some(dests_dict) = deref_dictionary(doc, catalog.get(b"Dests").ok()) {
        if let Ok(dest) = dests_dict.get(name) {
            return resolve_destination(doc, dest, page_map, hops);
        }
    }

    None
}

fn deref_dictionary<'a>(doc: &'a Document, obj: Option<&'a Object>) -> Option<&'a Dictionary> {
    match obj? {
        Object::Reference(r) => doc.get_dictionary(*r).ok(),
        Object::Dictionary(d) => Some(d),
        _ => None,
    }
}

fn search_name_tree<'a>(
    doc: &'a Document,
    node_id: ObjectId,
    name: &[u8],
    visited: &mut HashSet<ObjectId>,
) -> Option<&'a Object> {
    if !visited.insert(node_id) {
        return None;
    }
    let dict = doc.get_dictionary(node_id).ok()?;

    if let Ok(Object::Array(names)) = dict.get(b"Names") {
        for pair in names.chunks(2) {
            if let [Object::String(key, _), value] = pair {
                if key == name {
                    return Some(value);
                }
            }
        }
    }

    if let Ok(Object::Array(kids)) = dict.get(b"Kids") {
        for kid in kids {
            if let Object::Reference(kid_ref) = kid {
                if let Some(dest) = search_name_tree(doc, *kid_ref, name, visited) {
                    return Some(dest);
                }
            }
        }
    }

    None
}

fn page_from_dest_array(arr: &[Object], page_map: &PageMap) -> Option<u32> {
    // [page_ref /XYZ left top zoom] and friends
    match arr.first() {
        Some(Object::Reference(page_ref)) => page_map.get(page_ref).copied(),
        _ => None,
    }
}

fn build_page_map(doc: &Document) -> PageMap {
    doc.get_pages()
        .into_iter()
        .map(|(num, id)| (id, num - 1))
        .collect()
}

fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE_u8, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        // PDFDocEncoding / Latin-1 (simplified)
        bytes.iter().map(|&b| b as char).collect()
    }
}
