//! PPTX package generation.
//!
//! Writes the full OOXML package part by part into a ZIP archive:
//! content types, relationships, document properties, presentation,
//! theme, slide master, the two layouts, slides and notes slides.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::constants::*;
use crate::error::Result;
use crate::slide::{BodyLine, LineKind, Slide, SlideLayout};
use crate::theme::DeckTheme;

const WHITE: &str = "FFFFFF";

/// PPTX document writer
pub struct PptxWriter {
    /// Deck theme (colours, fonts, locale)
    theme: DeckTheme,

    /// Slides to render
    slides: Vec<Slide>,

    /// Presentation title
    title: Option<String>,

    /// Presentation author
    author: Option<String>,

    /// Creation timestamp (W3CDTF)
    created: Option<String>,
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new(DeckTheme::default())
    }
}

impl PptxWriter {
    /// Create a new PPTX writer with a theme
    pub fn new(theme: DeckTheme) -> Self {
        Self {
            theme,
            slides: Vec::new(),
            title: None,
            author: None,
            created: None,
        }
    }

    /// Set the presentation title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the creation timestamp (ISO-8601)
    pub fn with_created(mut self, created: impl Into<String>) -> Self {
        self.created = Some(created.into());
        self
    }

    /// Add a slide
    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// Add multiple slides
    pub fn add_slides(&mut self, slides: impl IntoIterator<Item = Slide>) {
        self.slides.extend(slides);
    }

    /// Generate the PPTX as bytes
    pub fn generate(&self) -> Result<Vec<u8>> {
        self.theme.validate()?;

        let cursor = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(cursor);

        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        self.write_content_types(&mut zip, options)?;
        self.write_root_rels(&mut zip, options)?;
        self.write_app_xml(&mut zip, options)?;
        self.write_core_xml(&mut zip, options)?;
        self.write_presentation_xml(&mut zip, options)?;
        self.write_presentation_rels(&mut zip, options)?;
        self.write_pres_props(&mut zip, options)?;
        self.write_view_props(&mut zip, options)?;
        self.write_theme(&mut zip, options)?;
        self.write_slide_master(&mut zip, options)?;
        self.write_slide_layouts(&mut zip, options)?;

        for (i, slide) in self.slides.iter().enumerate() {
            self.write_slide(&mut zip, options, i + 1, slide)?;

            if slide.has_notes() {
                self.write_notes_slide(&mut zip, options, i + 1, slide)?;
            }
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    fn write_content_types<W: Write + std::io::Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("[Content_Types].xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
  <Override PartName="/ppt/presProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presProps+xml"/>
  <Override PartName="/ppt/viewProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml"/>
  <Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
  <Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
  <Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
  <Override PartName="/ppt/slideLayouts/slideLayout2.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
  <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
"#,
        );

        for i in 1..=self.slides.len() {
            content.push_str(&format!(
                "  <Override PartName=\"/ppt/slides/slide{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>\n",
                i
            ));

            if self.slides[i - 1].has_notes() {
                content.push_str(&format!(
                    "  <Override PartName=\"/ppt/notesSlides/notesSlide{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.notesSlide+xml\"/>\n",
                    i
                ));
            }
        }

        content.push_str("</Types>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + std::io::Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("_rels/.rels", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_app_xml<W: Write + std::io::Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("docProps/app.xml", options)?;

        let notes = self.slides.iter().filter(|s| s.has_notes()).count();
        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
  <Application>E5 Compass</Application>
  <PresentationFormat>On-screen Show (16:9)</PresentationFormat>
  <Slides>{}</Slides>
  <Notes>{}</Notes>
  <HiddenSlides>0</HiddenSlides>
  <ScaleCrop>false</ScaleCrop>
  <LinksUpToDate>false</LinksUpToDate>
  <SharedDoc>false</SharedDoc>
  <HyperlinksChanged>false</HyperlinksChanged>
  <AppVersion>1.0</AppVersion>
</Properties>"#,
            self.slides.len(),
            notes
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_core_xml<W: Write + std::io::Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("docProps/core.xml", options)?;

        let title = self.title.as_deref().unwrap_or("Presentation");
        let author = self.author.as_deref().unwrap_or("E5 Compass");
        let created = self.created.as_deref().unwrap_or("1970-01-01T00:00:00Z");

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>{}</dc:title>
  <dc:creator>{}</dc:creator>
  <cp:lastModifiedBy>{}</cp:lastModifiedBy>
  <dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>
</cp:coreProperties>"#,
            escape_xml(title),
            escape_xml(author),
            escape_xml(author),
            escape_xml(created),
            escape_xml(created)
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_presentation_xml<W: Write + std::io::Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("ppt/presentation.xml", options)?;

        let mut slide_refs = String::new();
        for i in 1..=self.slides.len() {
            slide_refs.push_str(&format!(
                "    <p:sldId id=\"{}\" r:id=\"rId{}\"/>\n",
                255 + i,
                i + 3 // rId1=slideMaster, rId2=presProps, rId3=theme, rId4+=slides
            ));
        }

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">
  <p:sldMasterIdLst>
    <p:sldMasterId id="2147483648" r:id="rId1"/>
  </p:sldMasterIdLst>
  <p:sldIdLst>
{}  </p:sldIdLst>
  <p:sldSz cx="{}" cy="{}"/>
  <p:notesSz cx="{}" cy="{}"/>
</p:presentation>"#,
            NS_DRAWING,
            NS_RELATIONSHIPS,
            NS_PRESENTATION,
            slide_refs,
            SLIDE_WIDTH_EMU,
            SLIDE_HEIGHT_EMU,
            SLIDE_HEIGHT_EMU, // Notes are rotated
            SLIDE_WIDTH_EMU
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_presentation_rels<W: Write + std::io::Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("ppt/_rels/presentation.xml.rels", options)?;

        let mut rels = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps" Target="presProps.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
"#,
        );

        for i in 1..=self.slides.len() {
            rels.push_str(&format!(
                "  <Relationship Id=\"rId{}\" Type=\"{}\" Target=\"slides/slide{}.xml\"/>\n",
                i + 3,
                REL_TYPE_SLIDE,
                i
            ));
        }

        rels.push_str("</Relationships>");

        zip.write_all(rels.as_bytes())?;
        Ok(())
    }

    fn write_pres_props<W: Write + std::io::Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("ppt/presProps.xml", options)?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentationPr xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:extLst/>
</p:presentationPr>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_view_props<W: Write + std::io::Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("ppt/viewProps.xml", options)?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:viewPr xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:normalViewPr>
    <p:restoredLeft sz="15620"/>
    <p:restoredTop sz="94660"/>
  </p:normalViewPr>
  <p:slideViewPr>
    <p:cSldViewPr>
      <p:cViewPr>
        <p:scale>
          <a:sx n="100" d="100"/>
          <a:sy n="100" d="100"/>
        </p:scale>
        <p:origin x="0" y="0"/>
      </p:cViewPr>
    </p:cSldViewPr>
  </p:slideViewPr>
</p:viewPr>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_theme<W: Write + std::io::Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("ppt/theme/theme1.xml", options)?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="{ns}" name="E5 Compass">
  <a:themeElements>
    <a:clrScheme name="Compass">
      <a:dk1><a:srgbClr val="{text_dark}"/></a:dk1>
      <a:lt1><a:srgbClr val="{background}"/></a:lt1>
      <a:dk2><a:srgbClr val="{primary}"/></a:dk2>
      <a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>
      <a:accent1><a:srgbClr val="{primary}"/></a:accent1>
      <a:accent2><a:srgbClr val="ED7D31"/></a:accent2>
      <a:accent3><a:srgbClr val="A5A5A5"/></a:accent3>
      <a:accent4><a:srgbClr val="FFC000"/></a:accent4>
      <a:accent5><a:srgbClr val="5B9BD5"/></a:accent5>
      <a:accent6><a:srgbClr val="70AD47"/></a:accent6>
      <a:hlink><a:srgbClr val="0563C1"/></a:hlink>
      <a:folHlink><a:srgbClr val="954F72"/></a:folHlink>
    </a:clrScheme>
    <a:fontScheme name="Compass">
      <a:majorFont>
        <a:latin typeface="{title_font}"/>
        <a:ea typeface=""/>
        <a:cs typeface=""/>
      </a:majorFont>
      <a:minorFont>
        <a:latin typeface="{body_font}"/>
        <a:ea typeface=""/>
        <a:cs typeface=""/>
      </a:minorFont>
    </a:fontScheme>
    <a:fmtScheme name="Office">
      <a:fillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:fillStyleLst>
      <a:lnStyleLst>
        <a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
      </a:lnStyleLst>
      <a:effectStyleLst>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
      </a:effectStyleLst>
      <a:bgFillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:bgFillStyleLst>
    </a:fmtScheme>
  </a:themeElements>
</a:theme>"#,
            ns = NS_DRAWING,
            text_dark = self.theme.text_dark,
            background = self.theme.background,
            primary = self.theme.primary,
            title_font = escape_xml(&self.theme.title_font),
            body_font = escape_xml(&self.theme.body_font),
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_slide_master<W: Write + std::io::Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("ppt/slideMasters/slideMaster1.xml", options)?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:cSld>
    <p:bg>
      <p:bgRef idx="1001">
        <a:schemeClr val="bg1"/>
      </p:bgRef>
    </p:bg>
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>
  </p:cSld>
  <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
  <p:sldLayoutIdLst>
    <p:sldLayoutId id="2147483649" r:id="rId1"/>
    <p:sldLayoutId id="2147483650" r:id="rId2"/>
  </p:sldLayoutIdLst>
</p:sldMaster>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
        );

        zip.write_all(content.as_bytes())?;

        zip.start_file("ppt/slideMasters/_rels/slideMaster1.xml.rels", options)?;

        let rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="../slideLayouts/slideLayout1.xml"/>
  <Relationship Id="rId2" Type="{}" Target="../slideLayouts/slideLayout2.xml"/>
  <Relationship Id="rId3" Type="{}" Target="../theme/theme1.xml"/>
</Relationships>"#,
            NS_RELATIONSHIPS, REL_TYPE_SLIDE_LAYOUT, REL_TYPE_SLIDE_LAYOUT, REL_TYPE_THEME
        );

        zip.write_all(rels.as_bytes())?;
        Ok(())
    }

    fn write_slide_layouts<W: Write + std::io::Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        let layout_rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#,
            NS_RELATIONSHIPS, REL_TYPE_SLIDE_MASTER
        );

        // Layout 1: title/closing slides
        zip.start_file("ppt/slideLayouts/slideLayout1.xml", options)?;
        zip.write_all(self.layout_xml("title", "Title Slide").as_bytes())?;
        zip.start_file("ppt/slideLayouts/_rels/slideLayout1.xml.rels", options)?;
        zip.write_all(layout_rels.as_bytes())?;

        // Layout 2: content slides
        zip.start_file("ppt/slideLayouts/slideLayout2.xml", options)?;
        zip.write_all(self.layout_xml("obj", "Title and Content").as_bytes())?;
        zip.start_file("ppt/slideLayouts/_rels/slideLayout2.xml.rels", options)?;
        zip.write_all(layout_rels.as_bytes())?;

        Ok(())
    }

    fn layout_xml(&self, layout_type: &str, name: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" type="{}" preserve="1">
  <p:cSld name="{}">
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION, layout_type, name
        )
    }

    fn write_slide<W: Write + std::io::Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
        slide_num: usize,
        slide: &Slide,
    ) -> Result<()> {
        zip.start_file(format!("ppt/slides/slide{}.xml", slide_num), options)?;

        let content = self.slide_xml(slide);
        zip.write_all(content.as_bytes())?;

        zip.start_file(
            format!("ppt/slides/_rels/slide{}.xml.rels", slide_num),
            options,
        )?;

        let layout_idx = match slide.layout {
            SlideLayout::Title => 1,
            SlideLayout::Content => 2,
        };

        let mut rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="../slideLayouts/slideLayout{}.xml"/>
"#,
            NS_RELATIONSHIPS, REL_TYPE_SLIDE_LAYOUT, layout_idx
        );

        if slide.has_notes() {
            rels.push_str(&format!(
                "  <Relationship Id=\"rId2\" Type=\"{}\" Target=\"../notesSlides/notesSlide{}.xml\"/>\n",
                REL_TYPE_NOTES_SLIDE, slide_num
            ));
        }

        rels.push_str("</Relationships>");

        zip.write_all(rels.as_bytes())?;
        Ok(())
    }

    /// Generate slide XML content
    fn slide_xml(&self, slide: &Slide) -> String {
        let (bg, shapes) = match slide.layout {
            SlideLayout::Title => (&self.theme.primary, self.title_layout_shapes(slide)),
            SlideLayout::Content => (&self.theme.background, self.content_layout_shapes(slide)),
        };

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:cSld>
    <p:bg>
      <p:bgPr>
        <a:solidFill><a:srgbClr val="{}"/></a:solidFill>
        <a:effectLst/>
      </p:bgPr>
    </p:bg>
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
{}    </p:spTree>
  </p:cSld>
</p:sld>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION, bg, shapes
        )
    }

    /// Shapes for a title-layout slide: big centered title plus the
    /// stacked centered body lines, all on the brand background.
    fn title_layout_shapes(&self, slide: &Slide) -> String {
        let mut shapes = String::new();

        let title_para = format!(
            "          <a:p>\n            <a:pPr algn=\"ctr\"><a:buNone/></a:pPr>\n{}          </a:p>\n",
            self.run(&slide.title, 3200, true, false, WHITE, &self.theme.title_font)
        );
        shapes.push_str(&self.text_shape(
            2,
            "Title 1",
            emu_in(0.5),
            emu_in(2.0),
            SLIDE_WIDTH_EMU - emu_in(1.0),
            emu_in(1.4),
            &title_para,
        ));

        let mut body = String::new();
        for line in &slide.body {
            body.push_str(&self.body_paragraph(line, true));
        }
        if !body.is_empty() {
            shapes.push_str(&self.text_shape(
                3,
                "Body 2",
                emu_in(0.5),
                emu_in(3.6),
                SLIDE_WIDTH_EMU - emu_in(1.0),
                emu_in(3.0),
                &body,
            ));
        }

        shapes
    }

    /// Shapes for a content-layout slide: header bar with the slide
    /// title, the body text box, and the footer tag.
    fn content_layout_shapes(&self, slide: &Slide) -> String {
        let mut shapes = String::new();

        // Header bar
        shapes.push_str(&self.rect_shape(
            2,
            "Header Bar",
            0,
            0,
            SLIDE_WIDTH_EMU,
            emu_in(1.0),
            &self.theme.primary,
        ));

        let title_para = format!(
            "          <a:p>\n            <a:pPr><a:buNone/></a:pPr>\n{}          </a:p>\n",
            self.run(&slide.title, 2400, true, false, WHITE, &self.theme.title_font)
        );
        shapes.push_str(&self.text_shape(
            3,
            "Title 1",
            emu_in(0.5),
            emu_in(0.2),
            SLIDE_WIDTH_EMU - emu_in(1.0),
            emu_in(0.6),
            &title_para,
        ));

        let mut body = String::new();
        for line in &slide.body {
            body.push_str(&self.body_paragraph(line, false));
        }
        if !body.is_empty() {
            shapes.push_str(&self.text_shape(
                4,
                "Content 2",
                emu_in(0.6),
                emu_in(1.3),
                SLIDE_WIDTH_EMU - emu_in(1.2),
                SLIDE_HEIGHT_EMU - emu_in(1.8),
                &body,
            ));
        }

        if let Some(tag) = &slide.footer_tag {
            let tag_para = format!(
                "          <a:p>\n            <a:pPr><a:buNone/></a:pPr>\n{}          </a:p>\n",
                self.run(tag, 800, false, false, &self.theme.text_light, &self.theme.body_font)
            );
            shapes.push_str(&self.text_shape(
                5,
                "Footer 3",
                emu_in(0.5),
                SLIDE_HEIGHT_EMU - emu_in(0.35),
                emu_in(4.0),
                emu_in(0.3),
                &tag_para,
            ));
        }

        shapes
    }

    /// One `<a:p>` paragraph for a body line.
    ///
    /// `centered` is set on title-layout slides where every line is
    /// centered and white regardless of kind.
    fn body_paragraph(&self, line: &BodyLine, centered: bool) -> String {
        let theme = &self.theme;
        let (size, bold, italic, color, font): (u32, bool, bool, &str, &str) = match line.kind {
            LineKind::Heading => (2000, true, false, &theme.primary, &theme.title_font),
            LineKind::SubHeading => (1600, true, false, &theme.primary, &theme.title_font),
            LineKind::Bullet => (1400, false, false, &theme.text_dark, &theme.body_font),
            LineKind::Numbered => (1400, false, false, &theme.text_dark, &theme.body_font),
            LineKind::Text => (1400, false, false, &theme.text_dark, &theme.body_font),
            LineKind::Mono => (1200, false, false, &theme.text_dark, "Consolas"),
            LineKind::Subtitle => (2000, false, false, WHITE, &theme.body_font),
            LineKind::Meta => (1400, false, false, WHITE, &theme.body_font),
            LineKind::Tagline => (1000, false, true, WHITE, &theme.body_font),
            LineKind::Placeholder => (1400, false, true, &theme.text_light, &theme.body_font),
        };

        let color = if centered { WHITE } else { color };

        let mut ppr = String::from("<a:pPr");
        if centered || line.kind == LineKind::Placeholder {
            ppr.push_str(" algn=\"ctr\"");
        }
        if line.kind == LineKind::Bullet {
            ppr.push_str(&format!(" lvl=\"{}\"", line.indent.saturating_sub(1)));
        }
        ppr.push('>');
        match line.kind {
            LineKind::Bullet => {
                ppr.push_str("<a:buFont typeface=\"Arial\"/><a:buChar char=\"\u{2022}\"/>")
            }
            _ => ppr.push_str("<a:buNone/>"),
        }
        ppr.push_str("</a:pPr>");

        format!(
            "          <a:p>\n            {}\n{}          </a:p>\n",
            ppr,
            self.run(&line.text, size, bold, italic, color, font)
        )
    }

    /// One `<a:r>` text run.
    fn run(
        &self,
        text: &str,
        size: u32,
        bold: bool,
        italic: bool,
        color: &str,
        font: &str,
    ) -> String {
        let mut rpr = format!("lang=\"{}\" sz=\"{}\"", self.theme.locale, size);
        if bold {
            rpr.push_str(" b=\"1\"");
        }
        if italic {
            rpr.push_str(" i=\"1\"");
        }

        format!(
            "            <a:r>\n              <a:rPr {}><a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill><a:latin typeface=\"{}\"/></a:rPr>\n              <a:t>{}</a:t>\n            </a:r>\n",
            rpr,
            color,
            escape_xml(font),
            escape_xml(text)
        )
    }

    /// A solid-filled rectangle shape.
    #[allow(clippy::too_many_arguments)]
    fn rect_shape(
        &self,
        id: u32,
        name: &str,
        x: i64,
        y: i64,
        w: i64,
        h: i64,
        fill: &str,
    ) -> String {
        format!(
            r#"      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="{id}" name="{name}"/>
          <p:cNvSpPr/>
          <p:nvPr/>
        </p:nvSpPr>
        <p:spPr>
          <a:xfrm>
            <a:off x="{x}" y="{y}"/>
            <a:ext cx="{w}" cy="{h}"/>
          </a:xfrm>
          <a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
          <a:solidFill><a:srgbClr val="{fill}"/></a:solidFill>
          <a:ln><a:noFill/></a:ln>
        </p:spPr>
      </p:sp>
"#
        )
    }

    /// A positioned text box shape containing pre-built paragraphs.
    #[allow(clippy::too_many_arguments)]
    fn text_shape(
        &self,
        id: u32,
        name: &str,
        x: i64,
        y: i64,
        w: i64,
        h: i64,
        paragraphs: &str,
    ) -> String {
        format!(
            r#"      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="{id}" name="{name}"/>
          <p:cNvSpPr txBox="1"/>
          <p:nvPr/>
        </p:nvSpPr>
        <p:spPr>
          <a:xfrm>
            <a:off x="{x}" y="{y}"/>
            <a:ext cx="{w}" cy="{h}"/>
          </a:xfrm>
          <a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
          <a:noFill/>
        </p:spPr>
        <p:txBody>
          <a:bodyPr wrap="square" anchor="t"><a:normAutofit/></a:bodyPr>
          <a:lstStyle/>
{paragraphs}        </p:txBody>
      </p:sp>
"#
        )
    }

    fn write_notes_slide<W: Write + std::io::Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
        slide_num: usize,
        slide: &Slide,
    ) -> Result<()> {
        let Some(notes) = slide.notes.as_deref() else {
            return Ok(());
        };

        zip.start_file(
            format!("ppt/notesSlides/notesSlide{}.xml", slide_num),
            options,
        )?;

        let mut paragraphs = String::new();
        for line in notes.split('\n') {
            paragraphs.push_str(&format!(
                "          <a:p>\n            <a:r>\n              <a:rPr lang=\"{}\"/>\n              <a:t>{}</a:t>\n            </a:r>\n          </a:p>\n",
                self.theme.locale,
                escape_xml(line)
            ));
        }

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:notes xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:cSld>
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="2" name="Slide Image Placeholder 1"/>
          <p:cNvSpPr><a:spLocks noGrp="1" noRot="1" noChangeAspect="1"/></p:cNvSpPr>
          <p:nvPr><p:ph type="sldImg"/></p:nvPr>
        </p:nvSpPr>
        <p:spPr/>
      </p:sp>
      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="3" name="Notes Placeholder 2"/>
          <p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>
          <p:nvPr><p:ph type="body" idx="1"/></p:nvPr>
        </p:nvSpPr>
        <p:spPr/>
        <p:txBody>
          <a:bodyPr/>
          <a:lstStyle/>
{}        </p:txBody>
      </p:sp>
    </p:spTree>
  </p:cSld>
</p:notes>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION, paragraphs
        );

        zip.write_all(content.as_bytes())?;

        zip.start_file(
            format!("ppt/notesSlides/_rels/notesSlide{}.xml.rels", slide_num),
            options,
        )?;

        let rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="../slides/slide{}.xml"/>
</Relationships>"#,
            NS_RELATIONSHIPS, REL_TYPE_SLIDE, slide_num
        );

        zip.write_all(rels.as_bytes())?;
        Ok(())
    }
}

/// Convert inches to EMU.
fn emu_in(inches: f64) -> i64 {
    (inches * EMU_PER_INCH as f64) as i64
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slide::BodyLine;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_part(bytes: Vec<u8>, name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_generate_empty_deck_is_valid_zip() {
        let writer = PptxWriter::default()
            .with_title("Test Deck")
            .with_author("E5 Compass");

        let bytes = writer.generate().unwrap();
        assert!(!bytes.is_empty());
        assert!(ZipArchive::new(Cursor::new(bytes)).is_ok());
    }

    #[test]
    fn test_slides_and_parts_present() {
        let mut writer = PptxWriter::default();
        writer.add_slide(Slide::title_slide("Welcome"));
        let mut content = Slide::content_slide("1. Overview");
        content.push(BodyLine::bullet("First point", 1));
        writer.add_slide(content);

        let bytes = writer.generate().unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        assert!(archive.by_name("ppt/slides/slide1.xml").is_ok());
        assert!(archive.by_name("ppt/slides/slide2.xml").is_ok());
        assert!(archive.by_name("ppt/slideMasters/slideMaster1.xml").is_ok());
        assert!(archive.by_name("ppt/slideLayouts/slideLayout2.xml").is_ok());
        assert!(archive.by_name("docProps/core.xml").is_ok());
    }

    #[test]
    fn test_notes_slide_written() {
        let mut writer = PptxWriter::default();
        let mut slide = Slide::content_slide("With Notes");
        slide.notes = Some("Sources:\n- IBM".to_string());
        writer.add_slide(slide);

        let bytes = writer.generate().unwrap();
        let notes = read_part(bytes, "ppt/notesSlides/notesSlide1.xml");
        assert!(notes.contains("Sources:"));
        assert!(notes.contains("- IBM"));
    }

    #[test]
    fn test_metadata_in_core_xml() {
        let writer = PptxWriter::default()
            .with_title("Microsoft 365 E5 Business Case - Acme & Co")
            .with_author("E5 Compass")
            .with_created("2026-01-05T12:00:00Z");

        let bytes = writer.generate().unwrap();
        let core = read_part(bytes, "docProps/core.xml");
        // Ampersand must be escaped in XML.
        assert!(core.contains("Acme &amp; Co"));
        assert!(core.contains("2026-01-05T12:00:00Z"));
    }

    #[test]
    fn test_text_is_escaped_in_slides() {
        let mut writer = PptxWriter::default();
        let mut slide = Slide::content_slide("A < B");
        slide.push(BodyLine::new(LineKind::Text, "Cost & risk"));
        writer.add_slide(slide);

        let bytes = writer.generate().unwrap();
        let xml = read_part(bytes, "ppt/slides/slide1.xml");
        assert!(xml.contains("A &lt; B"));
        assert!(xml.contains("Cost &amp; risk"));
    }

    #[test]
    fn test_slide_text_round_trips_through_xml_reader() {
        use quick_xml::events::Event;
        use quick_xml::Reader;

        let mut writer = PptxWriter::default();
        let mut slide = Slide::content_slide("Title & <More>");
        slide.push(BodyLine::new(LineKind::Text, "Savings > £100k"));
        writer.add_slide(slide);

        let bytes = writer.generate().unwrap();
        let xml = read_part(bytes, "ppt/slides/slide1.xml");

        let mut reader = Reader::from_str(&xml);
        let mut texts = Vec::new();
        loop {
            match reader.read_event() {
                Ok(Event::Text(e)) => {
                    let text = e.unescape().unwrap_or_default().to_string();
                    if !text.trim().is_empty() {
                        texts.push(text);
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("generated slide XML is not well-formed: {}", e),
            }
        }

        assert!(texts.contains(&"Title & <More>".to_string()));
        assert!(texts.contains(&"Savings > £100k".to_string()));
    }

    #[test]
    fn test_theme_colours_applied() {
        let theme = DeckTheme {
            primary: "0B3D2E".to_string(),
            ..DeckTheme::default()
        };
        let mut writer = PptxWriter::new(theme);
        writer.add_slide(Slide::content_slide("T"));

        let bytes = writer.generate().unwrap();
        let theme_xml = read_part(bytes.clone(), "ppt/theme/theme1.xml");
        assert!(theme_xml.contains("0B3D2E"));
        let slide_xml = read_part(bytes, "ppt/slides/slide1.xml");
        assert!(slide_xml.contains("0B3D2E"));
    }

    #[test]
    fn test_invalid_theme_fails_generation() {
        let theme = DeckTheme {
            primary: "not-a-colour".to_string(),
            ..DeckTheme::default()
        };
        let writer = PptxWriter::new(theme);
        assert!(writer.generate().is_err());
    }

    #[test]
    fn test_bullet_levels_in_xml() {
        let mut writer = PptxWriter::default();
        let mut slide = Slide::content_slide("T");
        slide.push(BodyLine::bullet("top", 1));
        slide.push(BodyLine::bullet("nested", 2));
        writer.add_slide(slide);

        let bytes = writer.generate().unwrap();
        let xml = read_part(bytes, "ppt/slides/slide1.xml");
        assert!(xml.contains("lvl=\"1\""));
        assert!(xml.contains("buChar"));
    }
}
