//! Domain types for the slide canvas and for decks read back from disk.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// English Metric Units per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// A length in English Metric Units, the integer unit used by OOXML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Emu(pub i64);

impl Emu {
    /// Convert inches to EMU, truncating toward zero.
    pub fn from_inches(inches: f64) -> Self {
        Self((inches * EMU_PER_INCH as f64) as i64)
    }

    /// The raw EMU value.
    pub fn get(self) -> i64 {
        self.0
    }

    /// The value in inches.
    pub fn inches(self) -> f64 {
        self.0 as f64 / EMU_PER_INCH as f64
    }
}

impl fmt::Display for Emu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Create a colour from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }

    /// Upper-case six digit hex form, as used by `<a:srgbClr val=".."/>`.
    pub fn hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// Parse a six digit hex colour (no leading `#`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex())
    }
}

/// Position and size of a shape on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: Emu,
    pub top: Emu,
    pub width: Emu,
    pub height: Emu,
}

impl Rect {
    /// Build a frame from inch values.
    ///
    /// Offsets must be finite and non-negative; width and height must also
    /// be non-zero once converted to EMU.
    pub fn from_inches(left: f64, top: f64, width: f64, height: f64) -> Result<Self> {
        for (name, value) in [("left", left), ("top", top), ("width", width), ("height", height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidGeometry(format!(
                    "{} must be a finite, non-negative inch value (got {})",
                    name, value
                )));
            }
        }

        let rect = Self {
            left: Emu::from_inches(left),
            top: Emu::from_inches(top),
            width: Emu::from_inches(width),
            height: Emu::from_inches(height),
        };

        if rect.width.get() == 0 || rect.height.get() == 0 {
            return Err(Error::InvalidGeometry(format!(
                "frame {}x{} in has an empty extent",
                width, height
            )));
        }

        Ok(rect)
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// The DrawingML `algn` attribute value.
    pub fn as_ooxml(self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Center => "ctr",
            Self::Right => "r",
        }
    }
}

/// Character and paragraph formatting shared by every run of a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size_pt: u32,
    pub bold: bool,
    pub colour: Rgb,
    pub alignment: Alignment,
    pub font_name: String,
    /// Spacing after the paragraph, in points.
    pub space_after_pt: Option<u32>,
}

impl TextStyle {
    /// A regular, left-aligned style.
    pub fn new(font_size_pt: u32, colour: Rgb, font_name: impl Into<String>) -> Self {
        Self {
            font_size_pt,
            bold: false,
            colour,
            alignment: Alignment::Left,
            font_name: font_name.into(),
            space_after_pt: None,
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_space_after(mut self, points: u32) -> Self {
        self.space_after_pt = Some(points);
        self
    }
}

/// One paragraph of a text box. A `'\n'` in `text` is a line break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    pub style: TextStyle,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Identifier of a shape within its slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub u32);

/// What a shape draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// A word-wrapped text box with zero or more paragraphs.
    TextBox { paragraphs: Vec<Paragraph> },
    /// A filled rounded rectangle without outline or shadow.
    RoundedRect { fill: Rgb },
}

/// A positioned element on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub frame: Rect,
    pub kind: ShapeKind,
}

impl Shape {
    /// Paragraph texts of a text box; empty for other shapes.
    pub fn paragraph_texts(&self) -> Vec<&str> {
        match &self.kind {
            ShapeKind::TextBox { paragraphs } => paragraphs.iter().map(|p| p.text.as_str()).collect(),
            ShapeKind::RoundedRect { .. } => Vec::new(),
        }
    }
}

/// A slide on the canvas: a background fill and its shapes in z-order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub background: Option<Rgb>,
    shapes: Vec<Shape>,
}

impl Slide {
    /// Create an empty slide.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape and return its id.
    ///
    /// Ids start at 2; id 1 belongs to the slide's shape tree.
    pub fn push_shape(&mut self, frame: Rect, kind: ShapeKind) -> ShapeId {
        let id = ShapeId(self.shapes.len() as u32 + 2);
        self.shapes.push(Shape { id, frame, kind });
        id
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }
}

/// The slide canvas: an ordered sequence of slides of one fixed size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    slide_width: Emu,
    slide_height: Emu,
    slides: Vec<Slide>,
}

impl Presentation {
    /// Create an empty canvas with the given slide dimensions.
    pub fn new(slide_width: Emu, slide_height: Emu) -> Self {
        Self {
            slide_width,
            slide_height,
            slides: Vec::new(),
        }
    }

    /// Create an empty canvas sized in inches.
    pub fn with_size_inches(width: f64, height: f64) -> Result<Self> {
        let size = Rect::from_inches(0.0, 0.0, width, height)?;
        Ok(Self::new(size.width, size.height))
    }

    /// Append a blank slide and return it for drawing.
    pub fn add_slide(&mut self) -> &mut Slide {
        self.slides.push(Slide::new());
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slide_width(&self) -> Emu {
        self.slide_width
    }

    pub fn slide_height(&self) -> Emu {
        self.slide_height
    }
}

/// A deck read back from a PPTX file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDeck {
    /// Original filename (without path).
    pub filename: String,

    /// Slide width in EMU, from `<p:sldSz>`.
    pub slide_width: i64,

    /// Slide height in EMU, from `<p:sldSz>`.
    pub slide_height: i64,

    /// Slides in presentation order.
    pub slides: Vec<ParsedSlide>,
}

impl ParsedDeck {
    /// Create an empty outline for the given filename.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            slide_width: 0,
            slide_height: 0,
            slides: Vec::new(),
        }
    }

    /// Add a slide to the outline.
    pub fn add_slide(&mut self, slide: ParsedSlide) {
        self.slides.push(slide);
    }
}

/// A single slide read back from a PPTX file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedSlide {
    /// 1-based slide number.
    pub number: usize,

    /// Solid background colour, if the slide overrides it.
    pub background: Option<Rgb>,

    /// Shapes in document (z) order.
    pub shapes: Vec<ParsedShape>,
}

impl ParsedSlide {
    /// Create a new slide with the given number.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            background: None,
            shapes: Vec::new(),
        }
    }

    /// Find the first shape whose text is exactly `text`.
    pub fn shape_with_text(&self, text: &str) -> Option<&ParsedShape> {
        self.shapes.iter().find(|s| s.text() == text)
    }
}

/// A shape read back from slide XML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedShape {
    /// Whether the shape is flagged as a text box (`txBox="1"`).
    pub text_box: bool,

    /// Preset geometry name, e.g. `rect` or `roundRect`.
    pub preset: Option<String>,

    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,

    /// Solid fill of the shape itself.
    pub fill: Option<Rgb>,

    /// Paragraph texts; line breaks read back as `'\n'`.
    pub paragraphs: Vec<String>,
}

impl ParsedShape {
    /// All paragraphs joined by newlines.
    pub fn text(&self) -> String {
        self.paragraphs.join("\n")
    }
}
