//! PDF из модели документа (lopdf, стандартный шрифт Helvetica, A4)
//!
//! Стандартные шрифты PDF не содержат кириллицы, поэтому текст
//! транслитерируется в латиницу.

use contracts::shared::error::ListError;
use contracts::shared::export::{Block, DocumentModel, TableBlock, ThemeColor};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 40.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const TITLE_SIZE: f32 = 16.0;
const HEADING_SIZE: f32 = 13.0;
const TEXT_SIZE: f32 = 10.0;
const TABLE_SIZE: f32 = 8.5;
const ROW_HEIGHT: f32 = 14.0;

/// Средняя ширина символа Helvetica в долях кегля
const CHAR_WIDTH: f32 = 0.5;

const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);
const WHITE: (f32, f32, f32) = (1.0, 1.0, 1.0);
const GRAY: (f32, f32, f32) = (0.6, 0.6, 0.6);

// ============================================================================
// Транслитерация
// ============================================================================

fn cyrillic(lower: char) -> Option<&'static str> {
    let latin = match lower {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' | 'э' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' | 'ы' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' | 'ь' => "",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(latin)
}

/// Привести текст к ASCII для стандартного шрифта
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii() {
            out.push(ch);
            continue;
        }
        let lower = ch.to_lowercase().next().unwrap_or(ch);
        if let Some(latin) = cyrillic(lower) {
            if ch != lower {
                let mut chars = latin.chars();
                if let Some(first) = chars.next() {
                    out.push(first.to_ascii_uppercase());
                    out.push_str(chars.as_str());
                }
            } else {
                out.push_str(latin);
            }
            continue;
        }
        match ch {
            '№' => out.push_str("No."),
            '«' | '»' | '“' | '”' | '„' => out.push('"'),
            '‘' | '’' => out.push('\''),
            '–' | '—' | '−' => out.push('-'),
            '…' => out.push_str("..."),
            '\u{00A0}' | '\u{202F}' => out.push(' '),
            '₽' => out.push_str("RUB"),
            '€' => out.push_str("EUR"),
            _ => out.push('?'),
        }
    }
    out
}

/// Обрезать строку под ширину колонки
fn fit(text: &str, width: f32, size: f32) -> String {
    let max_chars = ((width / (size * CHAR_WIDTH)).floor() as usize).max(1);
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('.');
    cut
}

/// Перенос по словам
fn wrap(text: &str, width: f32, size: f32) -> Vec<String> {
    let max_chars = ((width / (size * CHAR_WIDTH)).floor() as usize).max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.len()
        } else {
            line.len() + 1 + word.len()
        };
        if needed > max_chars && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

// ============================================================================
// Раскладка по страницам
// ============================================================================

struct Layout {
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    y: f32,
    theme: (f32, f32, f32),
}

impl Layout {
    fn new(theme: ThemeColor) -> Self {
        Self {
            pages: Vec::new(),
            ops: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
            theme: theme.to_unit(),
        }
    }

    fn new_page(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        self.pages.push(ops);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    /// Перейти на новую страницу, если не помещается `height`
    fn ensure(&mut self, height: f32) -> bool {
        if self.y - height < MARGIN && self.y < PAGE_HEIGHT - MARGIN {
            self.new_page();
            true
        } else {
            false
        }
    }

    fn text(&mut self, x: f32, y: f32, size: f32, bold: bool, color: (f32, f32, f32), text: &str) {
        let font = if bold { "F2" } else { "F1" };
        self.ops.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.into(), size.into()]),
            Operation::new("rg", vec![color.0.into(), color.1.into(), color.2.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new("Tj", vec![Object::string_literal(transliterate(text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: (f32, f32, f32)) {
        self.ops.extend([
            Operation::new("rg", vec![color.0.into(), color.1.into(), color.2.into()]),
            Operation::new("re", vec![x.into(), y.into(), width.into(), height.into()]),
            Operation::new("f", vec![]),
        ]);
    }

    fn rule(&mut self, y: f32) {
        self.ops.extend([
            Operation::new("RG", vec![GRAY.0.into(), GRAY.1.into(), GRAY.2.into()]),
            Operation::new("w", vec![0.5_f32.into()]),
            Operation::new("m", vec![MARGIN.into(), y.into()]),
            Operation::new("l", vec![(PAGE_WIDTH - MARGIN).into(), y.into()]),
            Operation::new("S", vec![]),
        ]);
    }

    fn line(&mut self, size: f32, bold: bool, color: (f32, f32, f32), text: &str) {
        let height = size * 1.4;
        self.ensure(height);
        self.y -= height;
        self.text(MARGIN, self.y, size, bold, color, text);
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }

    fn paragraph(&mut self, text: &str) {
        for line in wrap(&transliterate(text), CONTENT_WIDTH, TEXT_SIZE) {
            self.line(TEXT_SIZE, false, BLACK, &line);
        }
    }

    fn table_header(&mut self, headers: &[String], column_width: f32) {
        self.y -= ROW_HEIGHT;
        self.fill_rect(MARGIN, self.y - 3.0, CONTENT_WIDTH, ROW_HEIGHT, self.theme);
        for (i, header) in headers.iter().enumerate() {
            let x = MARGIN + 2.0 + i as f32 * column_width;
            let label = fit(&transliterate(header), column_width - 4.0, TABLE_SIZE);
            self.text(x, self.y, TABLE_SIZE, true, WHITE, &label);
        }
    }

    /// Таблица; шапка повторяется на каждой новой странице
    fn table(&mut self, table: &TableBlock) {
        let columns = table.headers.len().max(1);
        let column_width = CONTENT_WIDTH / columns as f32;

        self.ensure(ROW_HEIGHT * 2.0);
        self.table_header(&table.headers, column_width);
        for row in &table.rows {
            if self.ensure(ROW_HEIGHT) {
                self.table_header(&table.headers, column_width);
            }
            self.y -= ROW_HEIGHT;
            for (i, cell) in row.iter().take(columns).enumerate() {
                let x = MARGIN + 2.0 + i as f32 * column_width;
                let value = fit(&transliterate(cell), column_width - 4.0, TABLE_SIZE);
                self.text(x, self.y, TABLE_SIZE, false, BLACK, &value);
            }
            self.rule(self.y - 4.0);
        }
        self.gap(6.0);
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.ops.is_empty() || self.pages.is_empty() {
            self.new_page();
        }
        self.pages
    }
}

fn layout(model: &DocumentModel) -> Vec<Vec<Operation>> {
    let mut layout = Layout::new(model.template.theme_color);
    let theme = layout.theme;

    let letterhead = model.template.letterhead();
    for (i, line) in letterhead.iter().enumerate() {
        let bold = i == 0;
        layout.line(TEXT_SIZE, bold, if bold { theme } else { GRAY }, line);
    }
    if !letterhead.is_empty() {
        layout.gap(4.0);
        layout.rule(layout.y);
        layout.gap(8.0);
    }

    layout.line(TITLE_SIZE, true, theme, &model.title);
    layout.gap(6.0);

    for block in &model.blocks {
        match block {
            // Заголовок совпадает с названием документа - не дублируем
            Block::Heading { text } if text == &model.title => {}
            Block::Heading { text } => {
                layout.gap(4.0);
                layout.line(HEADING_SIZE, true, theme, text);
            }
            Block::Paragraph { text } => layout.paragraph(text),
            Block::KeyValues { items } => {
                for (key, value) in items {
                    layout.line(TEXT_SIZE, false, BLACK, &format!("{}: {}", key, value));
                }
                layout.gap(4.0);
            }
            Block::Table(table) => layout.table(table),
        }
    }
    layout.finish()
}

// ============================================================================
// Сборка документа
// ============================================================================

fn pdf_error(e: impl std::fmt::Display) -> ListError {
    ListError::persistence(format!("PDF: {}", e))
}

/// Сформировать PDF; возвращает байты файла
pub fn render_pdf(model: &DocumentModel) -> Result<Vec<u8>, ListError> {
    let pages = layout(model);
    let total = pages.len();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(total);
    for (index, mut operations) in pages.into_iter().enumerate() {
        let footer = format!("{} / {}", index + 1, total);
        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 8_i64.into()]),
            Operation::new("rg", vec![GRAY.0.into(), GRAY.1.into(), GRAY.2.into()]),
            Operation::new("Td", vec![(PAGE_WIDTH - MARGIN - 30.0).into(), (MARGIN / 2.0).into()]),
            Operation::new("Tj", vec![Object::string_literal(footer)]),
            Operation::new("ET", vec![]),
        ]);

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().map_err(pdf_error)?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => total as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0_i64.into(), 0_i64.into(), (PAGE_WIDTH as i64).into(), (PAGE_HEIGHT as i64).into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(pdf_error)?;
    Ok(bytes)
}
