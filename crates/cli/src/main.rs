//! CLI tool that generates the Teachable Machine starter deck.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deck_core::{starter_deck, DeckStage, Emu, ParsedDeck, Theme, TITLE_SLIDE};
use deck_pptx::{PptxParser, PptxWriter};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Default destination, relative to the working directory.
const DEFAULT_OUTPUT: &str = "Teachable_Machine_Year7_6_Lessons_Starter_Deck.pptx";

/// Generate the Teachable Machine Year 7 starter deck (PPTX).
#[derive(Parser, Debug)]
#[command(name = "starter-deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Generate the deck (the default when no command is given)
    Generate {
        /// Destination .pptx file; an existing file is replaced
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Typeface for every text box (default: Segoe UI)
        #[arg(long, value_name = "NAME")]
        font: Option<String>,
    },

    /// Print the slide outline of an existing .pptx file
    Inspect {
        /// Input .pptx file
        input: PathBuf,

        /// Print the outline as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let command = args.command.unwrap_or_else(|| Command::Generate {
        output: PathBuf::from(DEFAULT_OUTPUT),
        font: None,
    });

    match command {
        Command::Generate { output, font } => {
            let theme = match font {
                Some(name) => Theme::default().with_font_name(name),
                None => Theme::default(),
            };
            generate(&output, &theme)?;
            println!("Saved: {}", output.display());
        }
        Command::Inspect { input, json } => {
            let deck = inspect(&input)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&deck)?);
            } else {
                print!("{}", format_outline(&deck)?);
            }
        }
    }

    Ok(())
}

/// Build the deck and save it to `output`.
fn generate(output: &Path, theme: &Theme) -> Result<()> {
    let presentation = starter_deck(theme).context("Failed to lay out the deck")?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    PptxWriter::new()
        .with_title(TITLE_SLIDE.title)
        .save(&presentation, output)
        .with_context(|| format!("Failed to save {}", output.display()))?;
    log::debug!("Deck stage: {}", DeckStage::Saved);

    log::info!("{} slides written to {}", presentation.slide_count(), output.display());
    log::debug!("Deck stage: {}", DeckStage::Done);
    Ok(())
}

/// Read a .pptx file back into its outline.
fn inspect(input: &Path) -> Result<ParsedDeck> {
    let file = File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let reader = BufReader::new(file);

    let filename = input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    PptxParser::new()
        .parse(reader, filename)
        .with_context(|| format!("Failed to parse {}", input.display()))
}

/// Human-readable outline: one block per slide, one line per paragraph.
fn format_outline(deck: &ParsedDeck) -> std::result::Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "{}: {} slides, {:.3} x {:.3} in",
        deck.filename,
        deck.slides.len(),
        Emu(deck.slide_width).inches(),
        Emu(deck.slide_height).inches()
    )?;

    for slide in &deck.slides {
        writeln!(out, "\nSlide {} ({} shapes)", slide.number, slide.shapes.len())?;
        for shape in &slide.shapes {
            for paragraph in &shape.paragraphs {
                writeln!(out, "  {}", paragraph.replace('\n', " / "))?;
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{ParsedShape, ParsedSlide};

    #[test]
    fn test_no_arguments_means_generate() {
        let args = Args::try_parse_from(["starter-deck"]).unwrap();
        assert_eq!(args.command, None);
        assert!(!args.verbose);
    }

    #[test]
    fn test_generate_output_flag() {
        let args = Args::try_parse_from(["starter-deck", "-v", "generate", "-o", "out/deck.pptx"]).unwrap();
        assert!(args.verbose);
        assert_eq!(
            args.command,
            Some(Command::Generate {
                output: PathBuf::from("out/deck.pptx"),
                font: None
            })
        );
    }

    #[test]
    fn test_generate_font_flag() {
        let args = Args::try_parse_from(["starter-deck", "generate", "--font", "Arial"]).unwrap();
        assert_eq!(
            args.command,
            Some(Command::Generate {
                output: PathBuf::from(DEFAULT_OUTPUT),
                font: Some("Arial".to_string())
            })
        );
    }

    #[test]
    fn test_generate_default_output() {
        let args = Args::try_parse_from(["starter-deck", "generate"]).unwrap();
        assert_eq!(
            args.command,
            Some(Command::Generate {
                output: PathBuf::from(DEFAULT_OUTPUT),
                font: None
            })
        );
    }

    #[test]
    fn test_inspect_requires_input() {
        assert!(Args::try_parse_from(["starter-deck", "inspect"]).is_err());
        let args = Args::try_parse_from(["starter-deck", "inspect", "deck.pptx", "--json"]).unwrap();
        assert_eq!(
            args.command,
            Some(Command::Inspect {
                input: PathBuf::from("deck.pptx"),
                json: true
            })
        );
    }

    #[test]
    fn test_format_outline() {
        let mut deck = ParsedDeck::new("deck.pptx");
        deck.slide_width = 12_191_695;
        deck.slide_height = 6_858_000;
        let mut slide = ParsedSlide::new(1);
        slide.shapes.push(ParsedShape {
            text_box: true,
            paragraphs: vec!["first\nline".to_string(), "second".to_string()],
            ..ParsedShape::default()
        });
        deck.add_slide(slide);

        let outline = format_outline(&deck).unwrap();
        assert!(outline.starts_with("deck.pptx: 1 slides, 13.333 x 7.500 in\n"));
        assert!(outline.contains("Slide 1 (1 shapes)"));
        assert!(outline.contains("  first / line\n  second\n"));
    }

    #[test]
    fn test_generate_then_inspect() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("deck.pptx");

        generate(&output, &Theme::default()).unwrap();
        let deck = inspect(&output).unwrap();

        assert_eq!(deck.filename, "deck.pptx");
        assert_eq!(deck.slides.len(), 7);
        assert_eq!(deck.slides[6].shapes[1].text(), "Lesson 6");
    }

    #[test]
    fn test_generate_with_custom_font() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("deck.pptx");

        generate(&output, &Theme::default().with_font_name("Arial")).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&output).unwrap()).unwrap();
        let mut slide = String::new();
        std::io::Read::read_to_string(&mut archive.by_name("ppt/slides/slide1.xml").unwrap(), &mut slide)
            .unwrap();
        assert!(slide.contains("typeface=\"Arial\""));
        assert!(!slide.contains("Segoe UI"));
    }

    #[test]
    fn test_inspect_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = inspect(&dir.path().join("absent.pptx")).unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }
}
