//! PPTX package writer.

use crate::parts::{
    self, Relationship, REL_CORE_PROPERTIES, REL_EXTENDED_PROPERTIES, REL_OFFICE_DOCUMENT, REL_PRES_PROPS,
    REL_SLIDE, REL_SLIDE_LAYOUT, REL_SLIDE_MASTER, REL_TABLE_STYLES, REL_THEME, REL_VIEW_PROPS,
    SLIDE_LAYOUT_PATH, SLIDE_MASTER_PATH, THEME_PATH, XML_DECLARATION,
};
use crate::slide_xml::slide_xml;
use deck_core::{Error, Presentation, Result};
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Relationship ids in `presentation.xml.rels` taken before the first slide.
const FIXED_PRESENTATION_RELS: usize = 5;

/// First `<p:sldId id>`; values below 256 are reserved.
const FIRST_SLIDE_ID: usize = 256;

/// Writer for PPTX (Office Open XML) files.
#[derive(Debug, Clone)]
pub struct PptxWriter {
    /// Document title stored in `docProps/core.xml`.
    title: Option<String>,

    /// Application name stored in the package properties.
    application: String,
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self {
            title: None,
            application: "starter-deck".to_string(),
        }
    }
}

impl PptxWriter {
    /// Create a new PPTX writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title recorded in the package properties.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Serialize the presentation and write it to `path`, replacing any
    /// existing file.
    ///
    /// The package is assembled in memory first, so a serialization failure
    /// leaves the destination untouched.
    pub fn save(&self, presentation: &Presentation, path: &Path) -> Result<()> {
        let bytes = self.to_bytes(presentation)?;
        std::fs::write(path, &bytes)?;
        log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    /// Serialize the presentation into an in-memory PPTX package.
    pub fn to_bytes(&self, presentation: &Presentation) -> Result<Vec<u8>> {
        let cursor = self.write(presentation, Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }

    /// Serialize the presentation as a ZIP package into `writer`.
    pub fn write<W: Write + Seek>(&self, presentation: &Presentation, writer: W) -> Result<W> {
        let slide_count = presentation.slide_count();
        let mut package = PackageWriter::new(writer);

        package.add_part("[Content_Types].xml", &parts::content_types_xml(slide_count)?)?;
        package.add_part(
            "_rels/.rels",
            &parts::relationships_xml(&[
                Relationship::new("rId1", REL_OFFICE_DOCUMENT, "ppt/presentation.xml"),
                Relationship::new("rId2", REL_CORE_PROPERTIES, "docProps/core.xml"),
                Relationship::new("rId3", REL_EXTENDED_PROPERTIES, "docProps/app.xml"),
            ])?,
        )?;
        package.add_part(
            "docProps/core.xml",
            &parts::core_properties_xml(self.title.as_deref(), &self.application)?,
        )?;
        package.add_part(
            "docProps/app.xml",
            &parts::app_properties_xml(&self.application, slide_count)?,
        )?;

        package.add_part("ppt/presentation.xml", &presentation_xml(presentation)?)?;
        package.add_part(
            "ppt/_rels/presentation.xml.rels",
            &parts::relationships_xml(&presentation_rels(slide_count))?,
        )?;
        package.add_part("ppt/presProps.xml", &parts::pres_props_xml())?;
        package.add_part("ppt/viewProps.xml", &parts::view_props_xml())?;
        package.add_part("ppt/tableStyles.xml", &parts::table_styles_xml())?;

        package.add_part(SLIDE_MASTER_PATH, &parts::slide_master_xml())?;
        package.add_part(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            &parts::relationships_xml(&[
                Relationship::new("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
                Relationship::new("rId2", REL_THEME, "../theme/theme1.xml"),
            ])?,
        )?;
        package.add_part(SLIDE_LAYOUT_PATH, &parts::slide_layout_xml())?;
        package.add_part(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            &parts::relationships_xml(&[Relationship::new(
                "rId1",
                REL_SLIDE_MASTER,
                "../slideMasters/slideMaster1.xml",
            )])?,
        )?;
        package.add_part(THEME_PATH, &parts::theme_xml())?;

        let slide_rels = parts::relationships_xml(&[Relationship::new(
            "rId1",
            REL_SLIDE_LAYOUT,
            "../slideLayouts/slideLayout1.xml",
        )])?;
        for (index, slide) in presentation.slides().iter().enumerate() {
            let number = index + 1;
            package.add_part(&format!("ppt/slides/slide{}.xml", number), &slide_xml(slide)?)?;
            package.add_part(&format!("ppt/slides/_rels/slide{}.xml.rels", number), &slide_rels)?;
        }

        package.finish()
    }
}

/// Relationships of `ppt/presentation.xml`: fixed parts, then one per slide.
fn presentation_rels(slide_count: usize) -> Vec<Relationship> {
    let mut rels = vec![
        Relationship::new("rId1", REL_SLIDE_MASTER, "slideMasters/slideMaster1.xml"),
        Relationship::new("rId2", REL_THEME, "theme/theme1.xml"),
        Relationship::new("rId3", REL_PRES_PROPS, "presProps.xml"),
        Relationship::new("rId4", REL_VIEW_PROPS, "viewProps.xml"),
        Relationship::new("rId5", REL_TABLE_STYLES, "tableStyles.xml"),
    ];
    for n in 1..=slide_count {
        rels.push(Relationship::new(
            slide_rel_id(n),
            REL_SLIDE,
            format!("slides/slide{}.xml", n),
        ));
    }
    rels
}

fn slide_rel_id(number: usize) -> String {
    format!("rId{}", FIXED_PRESENTATION_RELS + number)
}

/// Generate `ppt/presentation.xml`.
fn presentation_xml(presentation: &Presentation) -> Result<String> {
    let mut xml = String::with_capacity(1024);

    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
        parts::NS_A,
        parts::NS_R,
        parts::NS_P
    )?;

    xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);

    if presentation.slide_count() > 0 {
        xml.push_str("<p:sldIdLst>");
        for n in 1..=presentation.slide_count() {
            write!(
                xml,
                r#"<p:sldId id="{}" r:id="{}"/>"#,
                FIRST_SLIDE_ID + n - 1,
                slide_rel_id(n)
            )?;
        }
        xml.push_str("</p:sldIdLst>");
    }

    write!(
        xml,
        r#"<p:sldSz cx="{}" cy="{}"/>"#,
        presentation.slide_width(),
        presentation.slide_height()
    )?;
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");

    Ok(xml)
}

/// Thin wrapper over [`ZipWriter`] that writes deflated parts with a fixed
/// timestamp, so identical decks produce identical archives.
struct PackageWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    options: FileOptions,
}

impl<W: Write + Seek> PackageWriter<W> {
    fn new(writer: W) -> Self {
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());
        Self {
            zip: ZipWriter::new(writer),
            options,
        }
    }

    fn add_part(&mut self, path: &str, content: &str) -> Result<()> {
        self.zip
            .start_file(path, self.options)
            .map_err(|e| Error::ZipError(format!("Failed to start '{}': {}", path, e)))?;
        self.zip.write_all(content.as_bytes())?;
        log::debug!("Wrote part {} ({} bytes)", path, content.len());
        Ok(())
    }

    fn finish(mut self) -> Result<W> {
        self.zip
            .finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::PptxParser;
    use deck_core::content::{LESSONS, TITLE_SLIDE};
    use deck_core::deck::LESSON_SLIDE_SHAPES;
    use deck_core::{assemble, starter_deck, LessonRecord, ParsedDeck, Theme};
    use std::io::Read;
    use zip::ZipArchive;

    fn generated_deck() -> ParsedDeck {
        let presentation = starter_deck(&Theme::default()).unwrap();
        let bytes = PptxWriter::new().to_bytes(&presentation).unwrap();
        PptxParser::new().parse(Cursor::new(bytes), "deck.pptx").unwrap()
    }

    #[test]
    fn test_presentation_xml_lists_slides() {
        let presentation = starter_deck(&Theme::default()).unwrap();
        let xml = presentation_xml(&presentation).unwrap();
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId6"/>"#));
        assert!(xml.contains(r#"<p:sldId id="262" r:id="rId12"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="12191695" cy="6858000"/>"#));
    }

    #[test]
    fn test_package_contains_required_parts() {
        let presentation = starter_deck(&Theme::default()).unwrap();
        let bytes = PptxWriter::new()
            .with_title("Teachable Machine")
            .to_bytes(&presentation)
            .unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            SLIDE_MASTER_PATH,
            SLIDE_LAYOUT_PATH,
            THEME_PATH,
            "ppt/slides/slide7.xml",
            "ppt/slides/_rels/slide7.xml.rels",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing {}", name);
        }
        assert!(archive.by_name("ppt/slides/slide8.xml").is_err());

        let mut core = String::new();
        archive
            .by_name("docProps/core.xml")
            .unwrap()
            .read_to_string(&mut core)
            .unwrap();
        assert!(core.contains("<dc:title>Teachable Machine</dc:title>"));
    }

    #[test]
    fn test_deck_has_title_slide_then_lessons() {
        let deck = generated_deck();
        assert_eq!(deck.slides.len(), 7);
        assert_eq!(deck.slide_width, 12_191_695);
        assert_eq!(deck.slide_height, 6_858_000);

        let title = &deck.slides[0];
        assert_eq!(title.shapes.len(), 4);
        assert_eq!(title.shapes[0].text(), "Teachable Machine");
        assert_eq!(title.shapes[1].text(), "Year 7 — 6-Lesson Unit");

        for (slide, lesson) in deck.slides[1..].iter().zip(LESSONS.iter()) {
            assert_eq!(slide.shapes.len(), LESSON_SLIDE_SHAPES);
            assert_eq!(slide.shapes[2].text(), lesson.title);
        }
    }

    #[test]
    fn test_badges_read_lesson_number() {
        let deck = generated_deck();
        for (n, slide) in deck.slides.iter().enumerate().skip(1) {
            let badge_rect = &slide.shapes[0];
            let badge_label = &slide.shapes[1];
            assert_eq!(badge_rect.preset.as_deref(), Some("roundRect"));
            assert_eq!(badge_rect.fill, Some(LESSONS[n - 1].accent_colour));
            assert_eq!(badge_label.text(), format!("Lesson {}", n));
            assert_eq!(
                (badge_rect.x, badge_rect.y, badge_rect.width, badge_rect.height),
                (badge_label.x, badge_label.y, badge_label.width, badge_label.height)
            );
        }
    }

    #[test]
    fn test_discussion_paragraphs_match_record() {
        let deck = generated_deck();
        for (slide, lesson) in deck.slides[1..].iter().zip(LESSONS.iter()) {
            let discussion = &slide.shapes[8];
            assert!(discussion.text_box);
            assert_eq!(discussion.paragraphs, lesson.discussion_points.to_vec());
        }
    }

    #[test]
    fn test_lesson_two_scenario() {
        let deck = generated_deck();
        let slide = &deck.slides[2];
        assert!(slide.shape_with_text("Lesson 2").is_some());
        assert!(slide.shape_with_text("It Learned the Wrong Thing").is_some());
        assert_eq!(slide.shapes[8].paragraphs.len(), 3);
        assert_eq!(slide.shapes[8].paragraphs[1], "This is called BIAS.");
    }

    #[test]
    fn test_prompt_line_breaks_survive() {
        let deck = generated_deck();
        let prompt = &deck.slides[1].shapes[6];
        assert_eq!(prompt.paragraphs, vec![LESSONS[0].prompt_text.to_string()]);
    }

    #[test]
    fn test_empty_discussion_reads_back_empty() {
        let lesson = LessonRecord {
            discussion_points: &[],
            ..LESSONS[3]
        };
        let presentation = assemble(&Theme::default(), &TITLE_SLIDE, &[lesson]).unwrap();
        let bytes = PptxWriter::new().to_bytes(&presentation).unwrap();
        let deck = PptxParser::new().parse(Cursor::new(bytes), "empty.pptx").unwrap();

        assert_eq!(deck.slides.len(), 2);
        assert!(deck.slides[1].shapes[8].text_box);
        assert!(deck.slides[1].shapes[8].paragraphs.is_empty());
    }

    #[test]
    fn test_generation_is_deterministic() {
        let presentation = starter_deck(&Theme::default()).unwrap();
        let writer = PptxWriter::new();
        let first = writer.to_bytes(&presentation).unwrap();
        let second = writer.to_bytes(&starter_deck(&Theme::default()).unwrap()).unwrap();

        let parser = PptxParser::new();
        let a = parser.parse(Cursor::new(first), "deck.pptx").unwrap();
        let b = parser.parse(Cursor::new(second), "deck.pptx").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");

        let writer = PptxWriter::new();
        writer.save(&starter_deck(&Theme::default()).unwrap(), &path).unwrap();
        let title_only = assemble(&Theme::default(), &TITLE_SLIDE, &[]).unwrap();
        writer.save(&title_only, &path).unwrap();

        // The smaller package must not leave bytes of the larger one behind.
        let expected = writer.to_bytes(&title_only).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), expected.len() as u64);

        let file = std::fs::File::open(&path).unwrap();
        let deck = PptxParser::new().parse(file, "deck.pptx").unwrap();
        assert_eq!(deck.slides.len(), 1);
        assert_eq!(deck.slides[0].shapes[0].text(), "Teachable Machine");
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("deck.pptx");
        let presentation = starter_deck(&Theme::default()).unwrap();

        let err = PptxWriter::new().save(&presentation, &path).unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
        assert!(!path.exists());
    }
}
