//! Slide and shape XML generation.

use crate::parts::{NS_A, NS_P, NS_R, SHAPE_TREE_HEADER, XML_DECLARATION};
use deck_core::{Paragraph, Rect, Result, Shape, ShapeKind, Slide, TextStyle};
use quick_xml::escape::escape;
use std::fmt::Write as FmtWrite;

/// Generate `ppt/slides/slideN.xml` for one slide.
pub fn slide_xml(slide: &Slide) -> Result<String> {
    let mut xml = String::with_capacity(4096);

    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#, NS_A, NS_R, NS_P)?;
    xml.push_str("<p:cSld>");

    // Background must come before the shape tree.
    if let Some(colour) = slide.background {
        write!(
            xml,
            r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
            colour.hex()
        )?;
    }

    xml.push_str("<p:spTree>");
    xml.push_str(SHAPE_TREE_HEADER);
    for shape in slide.shapes() {
        write_shape(&mut xml, shape)?;
    }
    xml.push_str("</p:spTree>");
    xml.push_str("</p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");

    Ok(xml)
}

fn write_shape(xml: &mut String, shape: &Shape) -> Result<()> {
    let id = shape.id.0;
    xml.push_str("<p:sp><p:nvSpPr>");

    match &shape.kind {
        ShapeKind::TextBox { paragraphs } => {
            write!(xml, r#"<p:cNvPr id="{}" name="TextBox {}"/>"#, id, id - 1)?;
            xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#);

            xml.push_str("<p:spPr>");
            write_xfrm(xml, &shape.frame)?;
            xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/>"#);
            xml.push_str("</p:spPr>");

            xml.push_str("<p:txBody>");
            xml.push_str(r#"<a:bodyPr wrap="square" rtlCol="0"><a:spAutoFit/></a:bodyPr>"#);
            xml.push_str("<a:lstStyle/>");
            if paragraphs.is_empty() {
                // A text body needs at least one paragraph.
                xml.push_str("<a:p/>");
            }
            for paragraph in paragraphs {
                write_paragraph(xml, paragraph)?;
            }
            xml.push_str("</p:txBody>");
        }
        ShapeKind::RoundedRect { fill } => {
            write!(xml, r#"<p:cNvPr id="{}" name="Rounded Rectangle {}"/>"#, id, id - 1)?;
            xml.push_str("<p:cNvSpPr/><p:nvPr/></p:nvSpPr>");

            xml.push_str("<p:spPr>");
            write_xfrm(xml, &shape.frame)?;
            xml.push_str(r#"<a:prstGeom prst="roundRect"><a:avLst/></a:prstGeom>"#);
            write!(xml, r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#, fill.hex())?;
            xml.push_str("<a:ln><a:noFill/></a:ln>");
            xml.push_str("<a:effectLst/>");
            xml.push_str("</p:spPr>");
        }
    }

    xml.push_str("</p:sp>");
    Ok(())
}

fn write_xfrm(xml: &mut String, frame: &Rect) -> Result<()> {
    write!(
        xml,
        r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
        frame.left, frame.top, frame.width, frame.height
    )?;
    Ok(())
}

/// Write one `<a:p>`; each `'\n'` in the text becomes an `<a:br/>`.
fn write_paragraph(xml: &mut String, paragraph: &Paragraph) -> Result<()> {
    let style = &paragraph.style;

    xml.push_str("<a:p>");
    write!(xml, r#"<a:pPr algn="{}""#, style.alignment.as_ooxml())?;
    match style.space_after_pt {
        Some(points) => write!(
            xml,
            r#"><a:spcAft><a:spcPts val="{}"/></a:spcAft></a:pPr>"#,
            points * 100
        )?,
        None => xml.push_str("/>"),
    }

    for (i, segment) in paragraph.text.split('\n').enumerate() {
        if i > 0 {
            xml.push_str("<a:br>");
            write_run_properties(xml, "a:rPr", style)?;
            xml.push_str("</a:br>");
        }
        if !segment.is_empty() {
            xml.push_str("<a:r>");
            write_run_properties(xml, "a:rPr", style)?;
            write!(xml, "<a:t>{}</a:t>", escape(segment))?;
            xml.push_str("</a:r>");
        }
    }

    write_run_properties(xml, "a:endParaRPr", style)?;
    xml.push_str("</a:p>");
    Ok(())
}

fn write_run_properties(xml: &mut String, tag: &str, style: &TextStyle) -> Result<()> {
    write!(
        xml,
        r#"<{} lang="en-US" sz="{}" b="{}" dirty="0">"#,
        tag,
        style.font_size_pt * 100,
        if style.bold { 1 } else { 0 }
    )?;
    // Fill precedes the typeface in CT_TextCharacterProperties.
    write!(xml, r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#, style.colour.hex())?;
    write!(xml, r#"<a:latin typeface="{}"/>"#, escape(style.font_name.as_str()))?;
    write!(xml, "</{}>", tag)?;
    Ok(())
}
