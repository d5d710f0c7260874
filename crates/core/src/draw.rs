//! Drawing helpers that place shapes on a slide.

use crate::types::{Paragraph, Rect, Rgb, ShapeId, ShapeKind, Slide, TextStyle};

/// Trailing spacing of every bullet paragraph, in points.
pub const BULLET_SPACE_AFTER_PT: u32 = 8;

/// Set the slide's solid background fill.
pub fn set_background(slide: &mut Slide, colour: Rgb) {
    slide.background = Some(colour);
}

/// Add a word-wrapped text box holding a single paragraph.
pub fn add_text_box(slide: &mut Slide, frame: Rect, text: &str, style: &TextStyle) -> ShapeId {
    let paragraphs = vec![Paragraph::new(text, style.clone())];
    slide.push_shape(frame, ShapeKind::TextBox { paragraphs })
}

/// Add a text box with one paragraph per item, in order.
///
/// Each paragraph gets `style` plus [`BULLET_SPACE_AFTER_PT`] of trailing
/// spacing. An empty `items` yields a text box with no paragraphs.
pub fn add_bullet_list<S: AsRef<str>>(
    slide: &mut Slide,
    frame: Rect,
    items: &[S],
    style: &TextStyle,
) -> ShapeId {
    let style = style.clone().with_space_after(BULLET_SPACE_AFTER_PT);
    let paragraphs = items
        .iter()
        .map(|item| Paragraph::new(item.as_ref(), style.clone()))
        .collect();
    slide.push_shape(frame, ShapeKind::TextBox { paragraphs })
}

/// Add a filled rounded rectangle with no outline and no shadow.
pub fn add_rounded_rect(slide: &mut Slide, frame: Rect, fill: Rgb) -> ShapeId {
    slide.push_shape(frame, ShapeKind::RoundedRect { fill })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Alignment;

    fn frame() -> Rect {
        Rect::from_inches(1.0, 1.0, 4.0, 2.0).unwrap()
    }

    fn style() -> TextStyle {
        TextStyle::new(20, Rgb::new(0xFF, 0xFF, 0xFF), "Segoe UI")
    }

    #[test]
    fn test_set_background() {
        let mut slide = Slide::new();
        set_background(&mut slide, Rgb::new(0x1E, 0x29, 0x3B));
        assert_eq!(slide.background, Some(Rgb::new(0x1E, 0x29, 0x3B)));
        assert_eq!(slide.shape_count(), 0);
    }

    #[test]
    fn test_text_box_single_paragraph() {
        let mut slide = Slide::new();
        let centred = style().bold(true).aligned(Alignment::Center);
        let id = add_text_box(&mut slide, frame(), "Lesson 1", &centred);

        let shape = &slide.shapes()[0];
        assert_eq!(shape.id, id);
        assert_eq!(shape.paragraph_texts(), vec!["Lesson 1"]);
        match &shape.kind {
            ShapeKind::TextBox { paragraphs } => {
                assert!(paragraphs[0].style.bold);
                assert_eq!(paragraphs[0].style.alignment, Alignment::Center);
                assert_eq!(paragraphs[0].style.space_after_pt, None);
            }
            other => panic!("expected text box, got {:?}", other),
        }
    }

    #[test]
    fn test_text_box_keeps_line_breaks_in_one_paragraph() {
        let mut slide = Slide::new();
        add_text_box(&mut slide, frame(), "first\n\nsecond", &style());
        assert_eq!(slide.shapes()[0].paragraph_texts(), vec!["first\n\nsecond"]);
    }

    #[test]
    fn test_bullet_list_preserves_order_and_spacing() {
        let mut slide = Slide::new();
        add_bullet_list(&mut slide, frame(), &["a", "b", "c"], &style());

        let shape = &slide.shapes()[0];
        assert_eq!(shape.paragraph_texts(), vec!["a", "b", "c"]);
        if let ShapeKind::TextBox { paragraphs } = &shape.kind {
            assert!(paragraphs
                .iter()
                .all(|p| p.style.space_after_pt == Some(BULLET_SPACE_AFTER_PT)));
        }
    }

    #[test]
    fn test_empty_bullet_list() {
        let mut slide = Slide::new();
        let items: [&str; 0] = [];
        add_bullet_list(&mut slide, frame(), &items, &style());
        assert_eq!(slide.shape_count(), 1);
        assert!(slide.shapes()[0].paragraph_texts().is_empty());
    }

    #[test]
    fn test_rounded_rect() {
        let mut slide = Slide::new();
        add_rounded_rect(&mut slide, frame(), Rgb::new(0x25, 0x63, 0xEB));
        assert_eq!(
            slide.shapes()[0].kind,
            ShapeKind::RoundedRect {
                fill: Rgb::new(0x25, 0x63, 0xEB)
            }
        );
    }
}
