//! PPTX (Office Open XML) backend for the starter deck.
//!
//! Writes a slide canvas as a `.pptx` package (a ZIP archive of XML parts)
//! and reads packages back into a structural outline.

pub mod parser;
pub mod parts;
pub mod slide_xml;
pub mod writer;

pub use parser::PptxParser;
pub use writer::PptxWriter;
