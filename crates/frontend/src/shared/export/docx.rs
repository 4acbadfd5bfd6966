//! Word (DOCX) из модели документа
//!
//! Минимальный пакет: `[Content_Types].xml`, `_rels/.rels`, `word/document.xml`.
//! Оформление задается прямо в тексте (без styles.xml).

use contracts::shared::error::ListError;
use contracts::shared::export::{Block, DocumentModel, TableBlock};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

fn docx_error(e: impl std::fmt::Display) -> ListError {
    ListError::persistence(format!("DOCX: {}", e))
}

/// Оформление одного фрагмента текста
#[derive(Default, Clone, Copy)]
struct RunStyle<'a> {
    bold: bool,
    color: Option<&'a str>,
    /// Размер в полупунктах
    size: Option<u32>,
}

struct DocumentXml {
    xml: Writer<Vec<u8>>,
    theme: String,
}

impl DocumentXml {
    fn new(theme: String) -> Self {
        Self {
            xml: Writer::new(Vec::new()),
            theme,
        }
    }

    fn start(&mut self, tag: BytesStart<'_>) -> Result<(), ListError> {
        self.xml.write_event(Event::Start(tag)).map_err(docx_error)
    }

    fn end(&mut self, name: &str) -> Result<(), ListError> {
        self.xml.write_event(Event::End(BytesEnd::new(name))).map_err(docx_error)
    }

    fn empty(&mut self, tag: BytesStart<'_>) -> Result<(), ListError> {
        self.xml.write_event(Event::Empty(tag)).map_err(docx_error)
    }

    fn run(&mut self, text: &str, style: RunStyle<'_>) -> Result<(), ListError> {
        self.start(BytesStart::new("w:r"))?;
        if style.bold || style.color.is_some() || style.size.is_some() {
            self.start(BytesStart::new("w:rPr"))?;
            if style.bold {
                self.empty(BytesStart::new("w:b"))?;
            }
            if let Some(color) = style.color {
                self.empty(BytesStart::new("w:color").with_attributes([("w:val", color)]))?;
            }
            if let Some(size) = style.size {
                let size = size.to_string();
                self.empty(BytesStart::new("w:sz").with_attributes([("w:val", size.as_str())]))?;
            }
            self.end("w:rPr")?;
        }
        self.start(BytesStart::new("w:t").with_attributes([("xml:space", "preserve")]))?;
        self.xml
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(docx_error)?;
        self.end("w:t")?;
        self.end("w:r")
    }

    fn paragraph(&mut self, text: &str, style: RunStyle<'_>) -> Result<(), ListError> {
        self.start(BytesStart::new("w:p"))?;
        self.run(text, style)?;
        self.end("w:p")
    }

    fn cell(&mut self, text: &str, fill: Option<&str>, style: RunStyle<'_>) -> Result<(), ListError> {
        self.start(BytesStart::new("w:tc"))?;
        if let Some(fill) = fill {
            self.start(BytesStart::new("w:tcPr"))?;
            self.empty(BytesStart::new("w:shd").with_attributes([
                ("w:val", "clear"),
                ("w:color", "auto"),
                ("w:fill", fill),
            ]))?;
            self.end("w:tcPr")?;
        }
        self.paragraph(text, style)?;
        self.end("w:tc")
    }

    fn table(&mut self, table: &TableBlock) -> Result<(), ListError> {
        self.start(BytesStart::new("w:tbl"))?;
        self.start(BytesStart::new("w:tblPr"))?;
        self.empty(BytesStart::new("w:tblW").with_attributes([("w:w", "5000"), ("w:type", "pct")]))?;
        self.start(BytesStart::new("w:tblBorders"))?;
        for side in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
            self.empty(BytesStart::new(side).with_attributes([
                ("w:val", "single"),
                ("w:sz", "4"),
                ("w:color", "BFBFBF"),
            ]))?;
        }
        self.end("w:tblBorders")?;
        self.end("w:tblPr")?;

        let theme = self.theme.clone();
        self.start(BytesStart::new("w:tr"))?;
        for header in &table.headers {
            let style = RunStyle {
                bold: true,
                color: Some("FFFFFF"),
                size: None,
            };
            self.cell(header, Some(theme.as_str()), style)?;
        }
        self.end("w:tr")?;

        for row in &table.rows {
            self.start(BytesStart::new("w:tr"))?;
            for index in 0..table.headers.len() {
                let value = row.get(index).map(String::as_str).unwrap_or("");
                self.cell(value, None, RunStyle::default())?;
            }
            self.end("w:tr")?;
        }
        self.end("w:tbl")?;
        // Пустой абзац после таблицы, иначе соседние таблицы слипаются
        self.paragraph("", RunStyle::default())
    }

    fn render(mut self, model: &DocumentModel) -> Result<Vec<u8>, ListError> {
        self.xml
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(docx_error)?;
        self.start(BytesStart::new("w:document").with_attributes([("xmlns:w", WORD_NS)]))?;
        self.start(BytesStart::new("w:body"))?;

        let theme = self.theme.clone();
        let letterhead = model.template.letterhead();
        for (i, line) in letterhead.iter().enumerate() {
            let style = if i == 0 {
                RunStyle {
                    bold: true,
                    color: Some(theme.as_str()),
                    size: Some(24),
                }
            } else {
                RunStyle {
                    color: Some("7F7F7F"),
                    ..RunStyle::default()
                }
            };
            self.paragraph(line, style)?;
        }

        let title_style = RunStyle {
            bold: true,
            color: Some(theme.as_str()),
            size: Some(32),
        };
        self.paragraph(&model.title, title_style)?;

        for block in &model.blocks {
            match block {
                Block::Heading { text } if text == &model.title => {}
                Block::Heading { text } => self.paragraph(
                    text,
                    RunStyle {
                        bold: true,
                        color: Some(theme.as_str()),
                        size: Some(26),
                    },
                )?,
                Block::Paragraph { text } => self.paragraph(text, RunStyle::default())?,
                Block::KeyValues { items } => {
                    for (key, value) in items {
                        self.start(BytesStart::new("w:p"))?;
                        self.run(
                            &format!("{}: ", key),
                            RunStyle {
                                bold: true,
                                ..RunStyle::default()
                            },
                        )?;
                        self.run(value, RunStyle::default())?;
                        self.end("w:p")?;
                    }
                }
                Block::Table(table) => self.table(table)?,
            }
        }

        self.end("w:body")?;
        self.end("w:document")?;
        Ok(self.xml.into_inner())
    }
}

/// Сформировать DOCX; возвращает байты zip-пакета
pub fn render_docx(model: &DocumentModel) -> Result<Vec<u8>, ListError> {
    let document = DocumentXml::new(model.template.theme_color.to_hex()).render(model)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let entries: [(&str, &[u8]); 3] = [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", ROOT_RELS.as_bytes()),
        ("word/document.xml", &document),
    ];
    for (name, bytes) in entries {
        zip.start_file(name, options).map_err(docx_error)?;
        zip.write_all(bytes).map_err(docx_error)?;
    }
    let cursor = zip.finish().map_err(docx_error)?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::export::{DocumentTemplate, ThemeColor};
    use std::io::Read;

    fn document_xml(bytes: Vec<u8>) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    #[test]
    fn test_docx_is_zip_package() {
        let model = DocumentModel::new("Отчет", DocumentTemplate::default()).paragraph("текст");
        let bytes = render_docx(&model).unwrap();
        assert!(bytes.starts_with(b"PK"));

        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert!(names.contains(&"[Content_Types].xml"));
        assert!(names.contains(&"_rels/.rels"));
        assert!(names.contains(&"word/document.xml"));
    }

    #[test]
    fn test_text_is_escaped() {
        let model = DocumentModel::new("A & B", DocumentTemplate::default())
            .paragraph("<script>")
            .table(vec!["Имя".into()], vec![vec!["\"Ромашка\" & Ко".into()]]);
        let xml = document_xml(render_docx(&model).unwrap());
        assert!(xml.contains("A &amp; B"));
        assert!(xml.contains("&lt;script&gt;"));
        assert!(!xml.contains("<script>"));
        assert!(xml.contains("Ромашка"));
    }

    #[test]
    fn test_theme_color_fills_table_header() {
        let template = DocumentTemplate {
            theme_color: ThemeColor { r: 0xAA, g: 0x11, b: 0x22 },
            ..DocumentTemplate::default()
        };
        let model = DocumentModel::new("T", template).table(vec!["H".into()], vec![]);
        let xml = document_xml(render_docx(&model).unwrap());
        assert!(xml.contains(r#"w:fill="AA1122""#));
    }
}
