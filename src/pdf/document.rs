use crate::pdf::outline::{load_outline, BookmarkNode};
use lopdf::Document;
use std::ops::Range;
use std::path::Path;

pub struct PdfDocument {
    pub doc: Document,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> lopdf::Result<Self> {
        let doc = Document::load(path)?;
        Ok(PdfDocument { doc })
    }

    #[cfg(test)]
    pub fn from_document(doc: Document) -> Self {
        PdfDocument { doc }
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    pub fn outline(&self) -> lopdf::Result<Vec<BookmarkNode>> {
        load_outline(&self.doc)
    }

    /// Copy of the document holding only the zero-based pages in `pages`.
    ///
    /// The copy's outline is dropped since its entries would point at
    /// deleted pages.
    pub fn extract_range(&self, pages: &Range<u32>) -> anyhow::Result<Document> {
        let total = self.page_count();
        if pages.start >= pages.end || pages.end > total {
            anyhow::bail!(
                "Page range {}..{} is out of range (document has {} pages)",
                pages.start,
                pages.end,
                total
            );
        }

        let mut new_doc = self.doc.clone();

        // lopdf numbers pages from 1
        let pages_to_delete: Vec<u32> = (1..=total)
            .filter(|num| !(pages.start + 1..=pages.end).contains(num))
            .collect();
        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
        }

        if let Ok(catalog) = new_doc.catalog_mut() {
            catalog.remove(b"Outlines");
        }
        new_doc.prune_objects();
        new_doc.compress();

        Ok(new_doc)
    }

    /// Serialize fully in memory, then write the bytes to `path`.
    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> anyhow::Result<()> {
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        std::fs::write(&path, buffer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::test_support::{bookmark, build_pdf};

    #[test]
    fn test_extract_range_keeps_only_requested_pages() {
        let doc = PdfDocument::from_document(build_pdf(
            10,
            &[bookmark("A", 0, vec![]), bookmark("B", 4, vec![])],
        ));
        let extracted = doc.extract_range(&(4..7)).unwrap();
        assert_eq!(extracted.get_pages().len(), 3);
        assert!(extracted.catalog().unwrap().get(b"Outlines").is_err());
    }

    #[test]
    fn test_extract_range_rejects_bad_ranges() {
        let doc = PdfDocument::from_document(build_pdf(5, &[]));
        assert!(doc.extract_range(&(2..2)).is_err());
        assert!(doc.extract_range(&(3..6)).is_err());
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let doc = PdfDocument::from_document(build_pdf(4, &[]));
        let mut extracted = doc.extract_range(&(0..2)).unwrap();
        let path = dir.path().join("out.pdf");
        PdfDocument::save(&mut extracted, &path).unwrap();

        let reloaded = PdfDocument::open(&path).unwrap();
        assert_eq!(reloaded.page_count(), 2);
    }
}
