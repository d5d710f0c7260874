//! Slide content for the Teachable Machine Year 7 starter deck.
//!
//! Content is plain data; layout lives in [`crate::deck`].

use crate::theme::{DARK_BG, GREEN, PRIMARY, PURPLE};
use crate::types::Rgb;
use serde::Serialize;

/// The four stacked lines of the title slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TitleSlide {
    pub title: &'static str,
    pub unit_label: &'static str,
    pub subtitle: &'static str,
    pub footer_note: &'static str,
}

/// Content of one lesson starter slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LessonRecord {
    pub number: u8,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub question_label: &'static str,
    pub prompt_text: &'static str,
    pub discussion_points: &'static [&'static str],
    pub accent_colour: Rgb,
}

impl LessonRecord {
    /// Text of the colour-coded badge.
    pub fn badge_label(&self) -> String {
        format!("Lesson {}", self.number)
    }
}

pub const TITLE_SLIDE: TitleSlide = TitleSlide {
    title: "Teachable Machine",
    unit_label: "Year 7 — 6-Lesson Unit",
    subtitle: "Starter Activities",
    footer_note: "Windows PCs  |  No camera or mic needed  |  Image uploads only",
};

/// Caption at the bottom of every lesson slide.
pub const LESSON_FOOTER: &str = "Teachable Machine — Year 7 Unit";

pub const DISCUSSION_LABEL: &str = "Discussion";

pub static LESSONS: [LessonRecord; 6] = [
    LessonRecord {
        number: 1,
        title: "Teach the Computer",
        subtitle: "Your first 2-class model",
        question_label: "Think about it:",
        prompt_text: "How do YOU tell the difference between a circle and a triangle?\n\nWrite down 2 differences.",
        discussion_points: &[
            "Could you write exact rules that always work?",
            "What if the circle is wobbly or the triangle is rounded?",
            "Today you will teach a computer to tell the difference!",
        ],
        accent_colour: PRIMARY,
    },
    LessonRecord {
        number: 2,
        title: "It Learned the Wrong Thing",
        subtitle: "Bias & the background trick",
        question_label: "Imagine this:",
        prompt_text: "A school uses AI to pick students for the football team.\nThe AI was only trained on photos of boys.\n\nWhat might go wrong?",
        discussion_points: &[
            "The AI would never pick girls — not because they can't play,\n   but because it never saw examples of girls playing.",
            "This is called BIAS.",
            "Today you will create a biased model on purpose, then fix it.",
        ],
        accent_colour: Rgb::new(0xDC, 0x26, 0x26),
    },
    LessonRecord {
        number: 3,
        title: "Training vs Testing",
        subtitle: "Why we keep test data separate",
        question_label: "Think about it:",
        prompt_text: "You revise for a maths test by memorising the exact\nquestions from the textbook.\n\nThen the test has completely different questions.\n\nWould you do well? Why?",
        discussion_points: &[
            "Memorising is not the same as understanding.",
            "A model that only works on images it has seen = OVERFITTING.",
            "Today you will split data into TRAIN and TEST.",
        ],
        accent_colour: GREEN,
    },
    LessonRecord {
        number: 4,
        title: "More Classes",
        subtitle: "3-class model & confusion",
        question_label: "Quick quiz:",
        prompt_text: "You've trained a model to recognise circles and triangles.\n\nNow you want to add SQUARES.\n\nWhy might a third class make the model's job harder?",
        discussion_points: &[
            "More choices = more chance of confusion.",
            "Squares and triangles both have straight sides.",
            "Today you will build a 3-class model and improve it.",
        ],
        accent_colour: PURPLE,
    },
    LessonRecord {
        number: 5,
        title: "Make It a Product",
        subtitle: "Design your own AI tool",
        question_label: "Brainstorm:",
        prompt_text: "Think of 3 real-world problems that could be solved\nby a computer that recognises images.\n\nWrite them down. You have 2 minutes!",
        discussion_points: &[
            "Examples: sorting recycling, identifying weeds,\n   checking if PPE is worn, reading road signs...",
            "Today you will design and build your own AI product.",
        ],
        accent_colour: Rgb::new(0xEA, 0x58, 0x0C),
    },
    LessonRecord {
        number: 6,
        title: "Showcase & Mythbusters",
        subtitle: "Present, reflect, and discuss ethics",
        question_label: "Quick fire (2 minutes):",
        prompt_text: "Without looking back, write down as many KEY WORDS\nfrom this unit as you can remember.\n\nHow many can you get?",
        discussion_points: &[
            "Target words: machine learning, model, class, label,\n   training data, test data, accuracy, prediction,\n   bias, fairness, overfitting, confidence",
            "Today you will showcase your product and discuss\n   what AI can and cannot do.",
        ],
        accent_colour: DARK_BG,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lessons_numbered_in_order() {
        let numbers: Vec<u8> = LESSONS.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_every_lesson_has_discussion() {
        for lesson in &LESSONS {
            assert!(!lesson.discussion_points.is_empty(), "lesson {}", lesson.number);
            assert!(!lesson.title.is_empty());
        }
    }

    #[test]
    fn test_badge_label() {
        assert_eq!(LESSONS[1].badge_label(), "Lesson 2");
        assert_eq!(LESSONS[1].title, "It Learned the Wrong Thing");
    }
}
