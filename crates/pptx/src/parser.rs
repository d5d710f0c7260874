//! PPTX file parser implementation.

use deck_core::{Error, ParsedDeck, ParsedShape, ParsedSlide, Result, Rgb};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Parser that reads a PPTX package back into a structural outline.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a PPTX file from a reader.
    pub fn parse<R: Read + Seek>(&self, reader: R, filename: &str) -> Result<ParsedDeck> {
        let mut archive =
            ZipArchive::new(reader).map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        if archive.by_name("ppt/presentation.xml").is_err() {
            return Err(Error::CorruptedFile(format!(
                "{} has no ppt/presentation.xml part",
                filename
            )));
        }

        let mut deck = ParsedDeck::new(filename);

        let presentation = self.read_file_from_archive(&mut archive, "ppt/presentation.xml")?;
        let (width, height) = slide_size(&presentation)?;
        deck.slide_width = width;
        deck.slide_height = height;

        // Get the slide order from presentation.xml.rels
        let slide_order = self.get_slide_order(&mut archive)?;

        for (idx, slide_path) in slide_order.iter().enumerate() {
            let slide = self.parse_slide(&mut archive, slide_path, idx + 1)?;
            deck.add_slide(slide);
        }

        log::debug!("Parsed {} slides from {}", deck.slides.len(), filename);
        Ok(deck)
    }

    /// Get the ordered list of slide paths from the presentation relationships.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_path = "ppt/_rels/presentation.xml.rels";

        let rels_content = self.read_file_from_archive(archive, rels_path)?;
        let mut slides: Vec<(String, Option<usize>)> = Vec::new();

        let mut reader = Reader::from_str(&rels_content);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) if e.name().as_ref() == b"Relationship" => {
                    let rel_type = attribute(e, b"Type").unwrap_or_default();
                    let target = attribute(e, b"Target").unwrap_or_default();
                    let id = attribute(e, b"Id").unwrap_or_default();

                    if rel_type.ends_with("/slide") {
                        // Extract slide number from rId or target for ordering
                        let order_num = extract_slide_number(&id).or_else(|| extract_slide_number(&target));
                        let full_path = match target.strip_prefix('/') {
                            Some(absolute) => absolute.to_string(),
                            None => format!("ppt/{}", target),
                        };
                        slides.push((full_path, order_num));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing relationships: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        // Sort slides by their number
        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    /// Parse a single slide from the archive.
    fn parse_slide<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        slide_number: usize,
    ) -> Result<ParsedSlide> {
        let content = self.read_file_from_archive(archive, slide_path)?;
        let mut slide = ParsedSlide::new(slide_number);
        self.extract_slide_from_xml(&content, &mut slide)?;
        Ok(slide)
    }

    /// Extract the background and shapes from slide XML.
    fn extract_slide_from_xml(&self, xml_content: &str, slide: &mut ParsedSlide) -> Result<()> {
        // Text runs keep their whitespace, so no trimming here.
        let mut reader = Reader::from_str(xml_content);

        let mut state = SlideState::default();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    state.open(e, slide);
                }
                Ok(Event::Empty(ref e)) => {
                    state.open(e, slide);
                    state.close(local_name(e.name().as_ref()), slide);
                }
                Ok(Event::Text(ref e)) => {
                    if state.in_text {
                        let text = e.unescape().unwrap_or_default();
                        state.push_text(&text);
                    }
                }
                Ok(Event::End(ref e)) => {
                    state.close(local_name(e.name().as_ref()), slide);
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!("Error parsing slide {}: {}", slide.number, e)));
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the reader currently is inside a slide document.
#[derive(Debug, Default)]
struct SlideState {
    in_background: bool,
    in_shape_props: bool,
    in_line: bool,
    in_text_body: bool,
    in_text: bool,
    shape: Option<ParsedShape>,
}

impl SlideState {
    fn open(&mut self, e: &BytesStart<'_>, slide: &mut ParsedSlide) {
        let name = e.name();
        match local_name(name.as_ref()) {
            b"bg" => self.in_background = true,
            b"sp" => self.shape = Some(ParsedShape::default()),
            b"cNvSpPr" => {
                if let Some(shape) = self.shape.as_mut() {
                    shape.text_box = attribute(e, b"txBox").as_deref() == Some("1");
                }
            }
            b"spPr" => self.in_shape_props = self.shape.is_some(),
            b"ln" => self.in_line = true,
            b"prstGeom" => {
                if let Some(shape) = self.shape.as_mut() {
                    shape.preset = attribute(e, b"prst");
                }
            }
            b"off" if self.in_shape_props => {
                if let Some(shape) = self.shape.as_mut() {
                    shape.x = int_attribute(e, b"x");
                    shape.y = int_attribute(e, b"y");
                }
            }
            b"ext" if self.in_shape_props => {
                if let Some(shape) = self.shape.as_mut() {
                    shape.width = int_attribute(e, b"cx");
                    shape.height = int_attribute(e, b"cy");
                }
            }
            b"srgbClr" => {
                let colour = attribute(e, b"val").and_then(|v| Rgb::from_hex(&v));
                if self.in_background {
                    slide.background = colour;
                } else if self.in_shape_props && !self.in_line {
                    if let Some(shape) = self.shape.as_mut() {
                        shape.fill = colour;
                    }
                }
            }
            b"txBody" => self.in_text_body = self.shape.is_some(),
            b"p" if self.in_text_body => {
                if let Some(shape) = self.shape.as_mut() {
                    shape.paragraphs.push(String::new());
                }
            }
            b"br" if self.in_text_body => self.push_text("\n"),
            b"t" if self.in_text_body => self.in_text = true,
            _ => {}
        }
    }

    fn close(&mut self, local: &[u8], slide: &mut ParsedSlide) {
        match local {
            b"bg" => self.in_background = false,
            b"spPr" => self.in_shape_props = false,
            b"ln" => self.in_line = false,
            b"txBody" => self.in_text_body = false,
            b"t" => self.in_text = false,
            b"sp" => {
                if let Some(mut shape) = self.shape.take() {
                    // A lone empty paragraph is the format's placeholder
                    // for a text body without content.
                    if shape.paragraphs.len() == 1 && shape.paragraphs[0].is_empty() {
                        shape.paragraphs.clear();
                    }
                    slide.shapes.push(shape);
                }
                self.in_shape_props = false;
                self.in_line = false;
                self.in_text_body = false;
                self.in_text = false;
            }
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        match self.shape.as_mut().and_then(|s| s.paragraphs.last_mut()) {
            Some(paragraph) => paragraph.push_str(text),
            None => log::warn!("Text outside of a paragraph ignored: {:?}", text),
        }
    }
}

/// Read the `<p:sldSz>` dimensions from `presentation.xml`.
fn slide_size(xml_content: &str) -> Result<(i64, i64)> {
    let mut reader = Reader::from_str(xml_content);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) if local_name(e.name().as_ref()) == b"sldSz" => {
                return Ok((int_attribute(e, b"cx"), int_attribute(e, b"cy")));
            }
            Ok(Event::Eof) => {
                return Err(Error::PptxParseError(
                    "presentation.xml has no slide size".to_string(),
                ))
            }
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing presentation: {}", e)));
            }
            _ => {}
        }
    }
}

/// Value of the attribute with the given (qualified) key.
fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Integer attribute value, or 0 when missing or malformed.
fn int_attribute(e: &BytesStart<'_>, key: &[u8]) -> i64 {
    attribute(e, key).and_then(|v| v.parse().ok()).unwrap_or(0)
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    // Remove common extensions first
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    // Try to find digits at the end
    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
