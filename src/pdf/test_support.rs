//! In-memory PDFs with outlines, for tests.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

pub struct OutlineSpec {
    pub title: String,
    /// Zero-based target page; `None` points the bookmark at a missing object.
    pub page: Option<u32>,
    pub children: Vec<OutlineSpec>,
}

pub fn bookmark(title: &str, page: u32, children: Vec<OutlineSpec>) -> OutlineSpec {
    OutlineSpec {
        title: title.to_string(),
        page: Some(page),
        children,
    }
}

pub fn dangling(title: &str) -> OutlineSpec {
    OutlineSpec {
        title: title.to_string(),
        page: None,
        children: Vec::new(),
    }
}

/// Build a document with `num_pages` pages, each drawing its own number,
/// and an outline described by `outline` (omitted when empty).
pub fn build_pdf(num_pages: u32, outline: &[OutlineSpec]) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut page_ids = Vec::new();
    for i in 0..num_pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![100.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(format!("Page {}", i + 1))]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode page content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id);
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Count" => num_pages as i64,
        "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let mut catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };

    if !outline.is_empty() {
        let outlines_id = doc.new_object_id();
        let (first, last, count) = add_items(&mut doc, outlines_id, outline, &page_ids);
        doc.objects.insert(
            outlines_id,
            Object::Dictionary(dictionary! {
                "Type" => "Outlines",
                "First" => first,
                "Last" => last,
                "Count" => count,
            }),
        );
        catalog.set("Outlines", outlines_id);
    }

    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Add a sibling chain under `parent`; returns (first, last, visible count).
fn add_items(
    doc: &mut Document,
    parent: ObjectId,
    items: &[OutlineSpec],
    page_ids: &[ObjectId],
) -> (ObjectId, ObjectId, i64) {
    let ids: Vec<ObjectId> = items.iter().map(|_| doc.new_object_id()).collect();
    let mut count = items.len() as i64;

    for (i, item) in items.iter().enumerate() {
        let target = match item.page {
            Some(page) => Object::Reference(page_ids[page as usize]),
            None => Object::Reference((9999, 0)),
        };
        let mut dict = dictionary! {
            "Title" => Object::string_literal(item.title.as_str()),
            "Parent" => parent,
            "Dest" => vec![target, "Fit".into()],
        };
        if i > 0 {
            dict.set("Prev", ids[i - 1]);
        }
        if i + 1 < ids.len() {
            dict.set("Next", ids[i + 1]);
        }
        if !item.children.is_empty() {
            let (first, last, child_count) = add_items(doc, ids[i], &item.children, page_ids);
            dict.set("First", first);
            dict.set("Last", last);
            dict.set("Count", child_count);
            count += child_count;
        }
        doc.objects.insert(ids[i], Object::Dictionary(dict));
    }

    (ids[0], ids[ids.len() - 1], count)
}

/// Serialize `doc` into `dir/name` and return the path.
pub fn save_pdf(mut doc: Document, dir: &std::path::Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    doc.save(&path).expect("save test pdf");
    path
}
