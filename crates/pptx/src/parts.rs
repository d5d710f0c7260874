//! Fixed package parts shared by every generated deck.
//!
//! One slide master, one blank layout and one theme are enough for a valid
//! package; every slide uses the blank layout.

use deck_core::Result;
use quick_xml::escape::escape;
use std::fmt::Write as FmtWrite;

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

pub const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

pub const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
pub const REL_EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
pub const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
pub const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
pub const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
pub const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
pub const REL_PRES_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";
pub const REL_VIEW_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/viewProps";
pub const REL_TABLE_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles";

const CT_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_PRESENTATION: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE_MASTER: &str = "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_SLIDE_LAYOUT: &str = "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_PRES_PROPS: &str = "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";
const CT_VIEW_PROPS: &str = "application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml";
const CT_TABLE_STYLES: &str = "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml";
const CT_CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_EXTENDED_PROPERTIES: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";

pub const SLIDE_MASTER_PATH: &str = "ppt/slideMasters/slideMaster1.xml";
pub const SLIDE_LAYOUT_PATH: &str = "ppt/slideLayouts/slideLayout1.xml";
pub const THEME_PATH: &str = "ppt/theme/theme1.xml";

/// A single `<Relationship>` entry.
#[derive(Debug, Clone)]
pub struct Relationship {
    pub id: String,
    pub rel_type: &'static str,
    pub target: String,
}

impl Relationship {
    pub fn new(id: impl Into<String>, rel_type: &'static str, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rel_type,
            target: target.into(),
        }
    }
}

/// Render a `.rels` part.
pub fn relationships_xml(rels: &[Relationship]) -> Result<String> {
    let mut xml = String::with_capacity(256 + rels.len() * 160);
    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<Relationships xmlns="{}">"#, NS_RELATIONSHIPS)?;
    for rel in rels {
        write!(
            xml,
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            rel.id,
            rel.rel_type,
            escape(rel.target.as_str())
        )?;
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

/// Render `[Content_Types].xml` for a deck with `slide_count` slides.
pub fn content_types_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(2048 + slide_count * 160);
    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<Types xmlns="{}">"#, NS_CONTENT_TYPES)?;
    write!(xml, r#"<Default Extension="rels" ContentType="{}"/>"#, CT_RELS)?;
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);

    let overrides = [
        ("/ppt/presentation.xml", CT_PRESENTATION),
        ("/ppt/slideMasters/slideMaster1.xml", CT_SLIDE_MASTER),
        ("/ppt/slideLayouts/slideLayout1.xml", CT_SLIDE_LAYOUT),
        ("/ppt/theme/theme1.xml", CT_THEME),
        ("/ppt/presProps.xml", CT_PRES_PROPS),
        ("/ppt/viewProps.xml", CT_VIEW_PROPS),
        ("/ppt/tableStyles.xml", CT_TABLE_STYLES),
        ("/docProps/core.xml", CT_CORE_PROPERTIES),
        ("/docProps/app.xml", CT_EXTENDED_PROPERTIES),
    ];
    for (part, content_type) in overrides {
        write!(xml, r#"<Override PartName="{}" ContentType="{}"/>"#, part, content_type)?;
    }
    for n in 1..=slide_count {
        write!(
            xml,
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="{}"/>"#,
            n, CT_SLIDE
        )?;
    }

    xml.push_str("</Types>");
    Ok(xml)
}

/// Render `docProps/core.xml`.
pub fn core_properties_xml(title: Option<&str>, creator: &str) -> Result<String> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    ));
    if let Some(title) = title {
        write!(xml, "<dc:title>{}</dc:title>", escape(title))?;
    }
    write!(xml, "<dc:creator>{}</dc:creator>", escape(creator))?;
    xml.push_str("</cp:coreProperties>");
    Ok(xml)
}

/// Render `docProps/app.xml`.
pub fn app_properties_xml(application: &str, slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(256);
    xml.push_str(XML_DECLARATION);
    xml.push_str(r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">"#);
    write!(xml, "<Application>{}</Application>", escape(application))?;
    write!(xml, "<Slides>{}</Slides>", slide_count)?;
    xml.push_str("</Properties>");
    Ok(xml)
}

/// Empty shape tree header used by masters, layouts and slides.
pub const SHAPE_TREE_HEADER: &str = concat!(
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
    r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
);

pub fn slide_master_xml() -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!(
        r#"<p:sldMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        NS_A, NS_R, NS_P
    ));
    xml.push_str(r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>"#);
    xml.push_str("<p:spTree>");
    xml.push_str(SHAPE_TREE_HEADER);
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str(concat!(
        r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" "#,
        r#"accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" "#,
        r#"hlink="hlink" folHlink="folHlink"/>"#,
    ));
    xml.push_str(r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#);
    xml.push_str("</p:sldMaster>");
    xml
}

pub fn slide_layout_xml() -> String {
    let mut xml = String::with_capacity(768);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!(
        r#"<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" type="blank" preserve="1">"#,
        NS_A, NS_R, NS_P
    ));
    xml.push_str(r#"<p:cSld name="Blank"><p:spTree>"#);
    xml.push_str(SHAPE_TREE_HEADER);
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sldLayout>");
    xml
}

pub fn pres_props_xml() -> String {
    format!(
        r#"{}<p:presentationPr xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"/>"#,
        XML_DECLARATION, NS_A, NS_R, NS_P
    )
}

pub fn view_props_xml() -> String {
    format!(
        concat!(
            r#"{}<p:viewPr xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
            r#"<p:normalViewPr><p:restoredLeft sz="15620"/><p:restoredTop sz="94660"/></p:normalViewPr>"#,
            r#"<p:gridSpacing cx="76200" cy="76200"/></p:viewPr>"#,
        ),
        XML_DECLARATION, NS_A, NS_R, NS_P
    )
}

pub fn table_styles_xml() -> String {
    format!(
        r#"{}<a:tblStyleLst xmlns:a="{}" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#,
        XML_DECLARATION, NS_A
    )
}

pub fn theme_xml() -> String {
    let solid_ph = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    let line = format!(r#"<a:ln w="9525">{}</a:ln>"#, solid_ph);
    let effect = "<a:effectStyle><a:effectLst/></a:effectStyle>";
    let font = r#"<a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/>"#;

    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!(r#"<a:theme xmlns:a="{}" name="Office Theme"><a:themeElements>"#, NS_A));

    xml.push_str(r#"<a:clrScheme name="Office">"#);
    xml.push_str(r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#);
    xml.push_str(r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#);
    for (slot, colour) in [
        ("dk2", "1F497D"),
        ("lt2", "EEECE1"),
        ("accent1", "4F81BD"),
        ("accent2", "C0504D"),
        ("accent3", "9BBB59"),
        ("accent4", "8064A2"),
        ("accent5", "4BACC6"),
        ("accent6", "F79646"),
        ("hlink", "0000FF"),
        ("folHlink", "800080"),
    ] {
        xml.push_str(&format!(r#"<a:{0}><a:srgbClr val="{1}"/></a:{0}>"#, slot, colour));
    }
    xml.push_str("</a:clrScheme>");

    xml.push_str(&format!(
        r#"<a:fontScheme name="Office"><a:majorFont>{0}</a:majorFont><a:minorFont>{0}</a:minorFont></a:fontScheme>"#,
        font
    ));

    xml.push_str(r#"<a:fmtScheme name="Office">"#);
    xml.push_str(&format!("<a:fillStyleLst>{0}{0}{0}</a:fillStyleLst>", solid_ph));
    xml.push_str(&format!("<a:lnStyleLst>{0}{0}{0}</a:lnStyleLst>", line));
    xml.push_str(&format!("<a:effectStyleLst>{0}{0}{0}</a:effectStyleLst>", effect));
    xml.push_str(&format!("<a:bgFillStyleLst>{0}{0}{0}</a:bgFillStyleLst>", solid_ph));
    xml.push_str("</a:fmtScheme>");

    xml.push_str("</a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types_lists_every_slide() {
        let xml = content_types_xml(7).unwrap();
        assert!(xml.contains(r#"PartName="/ppt/slides/slide1.xml""#));
        assert!(xml.contains(r#"PartName="/ppt/slides/slide7.xml""#));
        assert!(!xml.contains("slide8.xml"));
        assert!(xml.contains("/ppt/theme/theme1.xml"));
    }

    #[test]
    fn test_relationships_escape_targets() {
        let rels = [Relationship::new("rId1", REL_SLIDE, "slides/a&b.xml")];
        let xml = relationships_xml(&rels).unwrap();
        assert!(xml.contains(r#"Target="slides/a&amp;b.xml""#));
        assert!(xml.contains(REL_SLIDE));
    }

    #[test]
    fn test_core_properties_title_is_optional() {
        let with = core_properties_xml(Some("Deck <1>"), "starter-deck").unwrap();
        assert!(with.contains("<dc:title>Deck &lt;1&gt;</dc:title>"));
        let without = core_properties_xml(None, "starter-deck").unwrap();
        assert!(!without.contains("dc:title"));
    }

    #[test]
    fn test_theme_has_three_of_each_style() {
        let xml = theme_xml();
        assert_eq!(xml.matches("<a:effectStyle>").count(), 3);
        assert_eq!(xml.matches(r#"<a:ln w="9525">"#).count(), 3);
        assert!(xml.ends_with("</a:theme>"));
    }
}
