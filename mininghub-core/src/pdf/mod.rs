pub mod document;
pub mod fonts;
pub mod objects;
pub mod truetype;
pub mod writer;

pub use document::PdfBackend;
