use serde::{Deserialize, Serialize};

use super::Exportable;

/// Цвет темы документа (заголовки, шапка таблиц)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ThemeColor {
    pub const DEFAULT: ThemeColor = ThemeColor {
        r: 0x1f,
        g: 0x4e,
        b: 0x79,
    };

    /// Разобрать `#RRGGBB` (решетка необязательна)
    pub fn parse(value: &str) -> Option<Self> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Компоненты в диапазоне 0..1 (для PDF)
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

impl Default for ThemeColor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Параметры бланка: реквизиты компании и цвет
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTemplate {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contacts: String,
    #[serde(default)]
    pub theme_color: ThemeColor,
}

impl DocumentTemplate {
    /// Строки шапки документа (пустые реквизиты пропускаются)
    pub fn letterhead(&self) -> Vec<&str> {
        [
            self.company_name.as_str(),
            self.address.as_str(),
            self.contacts.as_str(),
        ]
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableBlock {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading { text: String },
    Paragraph { text: String },
    KeyValues { items: Vec<(String, String)> },
    Table(TableBlock),
}

/// Документ, независимый от формата вывода
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentModel {
    pub title: String,
    pub template: DocumentTemplate,
    pub blocks: Vec<Block>,
}

impl DocumentModel {
    pub fn new(title: impl Into<String>, template: DocumentTemplate) -> Self {
        Self {
            title: title.into(),
            template,
            blocks: Vec::new(),
        }
    }

    pub fn heading(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Heading { text: text.into() });
        self
    }

    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Paragraph { text: text.into() });
        self
    }

    pub fn key_values(mut self, items: Vec<(String, String)>) -> Self {
        self.blocks.push(Block::KeyValues { items });
        self
    }

    pub fn table(mut self, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        self.blocks.push(Block::Table(TableBlock { headers, rows }));
        self
    }

    /// Документ-таблица по записям (текущий отфильтрованный порядок)
    pub fn from_records<T: Exportable>(
        title: impl Into<String>,
        template: DocumentTemplate,
        records: &[T],
    ) -> Self {
        let headers = T::headers().into_iter().map(str::to_string).collect();
        let rows = records.iter().map(Exportable::to_csv_row).collect();
        Self::new(title, template)
            .table(headers, rows)
            .paragraph(format!("Всего записей: {}", records.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_color_parse() {
        assert_eq!(
            ThemeColor::parse("#FF8000"),
            Some(ThemeColor { r: 255, g: 128, b: 0 })
        );
        assert_eq!(ThemeColor::parse("00ff00").map(|c| c.g), Some(255));
        assert_eq!(ThemeColor::parse("#12345"), None);
        assert_eq!(ThemeColor::parse("#GG0000"), None);
        assert_eq!(ThemeColor::DEFAULT.to_hex(), "1F4E79");
    }

    #[test]
    fn test_letterhead_skips_empty_lines() {
        let template = DocumentTemplate {
            company_name: "ООО Ромашка".into(),
            address: "  ".into(),
            contacts: "+7 900 000-00-00".into(),
            theme_color: ThemeColor::DEFAULT,
        };
        assert_eq!(
            template.letterhead(),
            vec!["ООО Ромашка", "+7 900 000-00-00"]
        );
    }
}
