pub mod document;
pub mod outline;

#[cfg(test)]
pub mod test_support;

pub use document::PdfDocument;
pub use outline::BookmarkNode;
