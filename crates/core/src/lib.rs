//! Core types, content and layout for the Teachable Machine starter deck.
//!
//! Builds the deck as an in-memory slide canvas; serialization lives in
//! the `deck-pptx` crate.

pub mod content;
pub mod deck;
pub mod draw;
pub mod error;
pub mod theme;
pub mod types;

pub use content::{LessonRecord, TitleSlide, LESSONS, TITLE_SLIDE};
pub use deck::{assemble, starter_deck, DeckStage};
pub use error::{Error, Result};
pub use theme::{Palette, Theme};
pub use types::{
    Alignment, Emu, ParsedDeck, ParsedShape, ParsedSlide, Paragraph, Presentation, Rect, Rgb, Shape, ShapeId,
    ShapeKind, Slide, TextStyle,
};
