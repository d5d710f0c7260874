//! Deck assembly: lays out the title slide and one slide per lesson.

use crate::content::{LessonRecord, TitleSlide, DISCUSSION_LABEL, LESSONS, LESSON_FOOTER, TITLE_SLIDE};
use crate::draw::{add_bullet_list, add_rounded_rect, add_text_box, set_background};
use crate::error::Result;
use crate::theme::Theme;
use crate::types::{Alignment, Presentation, Rect};
use std::fmt;

/// Widescreen (16:9) slide size in inches.
pub const SLIDE_WIDTH_IN: f64 = 13.333;
pub const SLIDE_HEIGHT_IN: f64 = 7.5;

/// Frame as `[left, top, width, height]` in inches.
type Frame = [f64; 4];

const TITLE: Frame = [1.5, 1.5, 10.0, 1.5];
const UNIT_LABEL: Frame = [1.5, 3.0, 10.0, 1.0];
const SUBTITLE: Frame = [1.5, 4.2, 10.0, 1.0];
const FOOTER_NOTE: Frame = [1.5, 5.8, 10.0, 0.6];

const BADGE: Frame = [0.8, 0.5, 1.4, 0.7];
const LESSON_TITLE: Frame = [2.5, 0.45, 8.0, 0.8];
const LESSON_SUBTITLE: Frame = [2.5, 1.15, 8.0, 0.5];
const PROMPT_PANEL: Frame = [0.8, 2.0, 6.5, 3.5];
const QUESTION: Frame = [1.1, 2.15, 6.0, 0.6];
const PROMPT: Frame = [1.1, 2.75, 6.0, 2.5];
const DISCUSSION: Frame = [7.8, 2.0, 5.0, 0.5];
const DISCUSSION_POINTS: Frame = [7.8, 2.5, 5.0, 3.5];
const LESSON_FOOTER_FRAME: Frame = [0.8, 6.6, 11.0, 0.5];

/// Number of shapes drawn on every lesson slide.
pub const LESSON_SLIDE_SHAPES: usize = 10;

/// Progress of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckStage {
    Init,
    TitleSlideBuilt,
    LessonSlideBuilt(u8),
    Saved,
    Done,
}

impl fmt::Display for DeckStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::TitleSlideBuilt => write!(f, "title slide built"),
            Self::LessonSlideBuilt(n) => write!(f, "lesson {} slide built", n),
            Self::Saved => write!(f, "saved"),
            Self::Done => write!(f, "done"),
        }
    }
}

fn frame([left, top, width, height]: Frame) -> Result<Rect> {
    Rect::from_inches(left, top, width, height)
}

/// Build the starter deck from the built-in content table.
pub fn starter_deck(theme: &Theme) -> Result<Presentation> {
    assemble(theme, &TITLE_SLIDE, &LESSONS)
}

/// Build a deck: the title slide followed by one slide per lesson, in order.
pub fn assemble(theme: &Theme, title: &TitleSlide, lessons: &[LessonRecord]) -> Result<Presentation> {
    log::debug!("Deck stage: {}", DeckStage::Init);
    let mut presentation = Presentation::with_size_inches(SLIDE_WIDTH_IN, SLIDE_HEIGHT_IN)?;

    build_title_slide(&mut presentation, theme, title)?;
    log::debug!("Deck stage: {}", DeckStage::TitleSlideBuilt);

    for lesson in lessons {
        build_lesson_slide(&mut presentation, theme, lesson)?;
        log::debug!("Deck stage: {}", DeckStage::LessonSlideBuilt(lesson.number));
    }

    Ok(presentation)
}

fn build_title_slide(presentation: &mut Presentation, theme: &Theme, title: &TitleSlide) -> Result<()> {
    let palette = &theme.palette;
    let slide = presentation.add_slide();
    set_background(slide, palette.background);

    add_text_box(slide, frame(TITLE)?, title.title, &theme.text(52, palette.text).bold(true));
    add_text_box(slide, frame(UNIT_LABEL)?, title.unit_label, &theme.text(32, palette.accent));
    add_text_box(slide, frame(SUBTITLE)?, title.subtitle, &theme.text(28, palette.muted));
    add_text_box(slide, frame(FOOTER_NOTE)?, title.footer_note, &theme.text(18, palette.muted));

    Ok(())
}

fn build_lesson_slide(presentation: &mut Presentation, theme: &Theme, lesson: &LessonRecord) -> Result<()> {
    let palette = &theme.palette;
    let slide = presentation.add_slide();
    set_background(slide, palette.background);

    // Badge: the label sits on top of the rectangle in the same frame.
    let badge = frame(BADGE)?;
    add_rounded_rect(slide, badge, lesson.accent_colour);
    add_text_box(
        slide,
        badge,
        &lesson.badge_label(),
        &theme.text(20, palette.text).bold(true).aligned(Alignment::Center),
    );

    add_text_box(slide, frame(LESSON_TITLE)?, lesson.title, &theme.text(40, palette.text).bold(true));
    add_text_box(slide, frame(LESSON_SUBTITLE)?, lesson.subtitle, &theme.text(22, palette.muted));

    add_rounded_rect(slide, frame(PROMPT_PANEL)?, palette.panel);
    add_text_box(
        slide,
        frame(QUESTION)?,
        lesson.question_label,
        &theme.text(24, palette.accent).bold(true),
    );
    add_text_box(slide, frame(PROMPT)?, lesson.prompt_text, &theme.text(22, palette.text));

    add_text_box(
        slide,
        frame(DISCUSSION)?,
        DISCUSSION_LABEL,
        &theme.text(20, palette.accent).bold(true),
    );
    add_bullet_list(
        slide,
        frame(DISCUSSION_POINTS)?,
        lesson.discussion_points,
        &theme.text(19, palette.muted),
    );

    add_text_box(slide, frame(LESSON_FOOTER_FRAME)?, LESSON_FOOTER, &theme.text(14, palette.muted));

    Ok(())
}
