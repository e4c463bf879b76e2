//! CSV options

/// Options for reading delimited text
#[derive(Debug, Clone)]
pub struct CsvReadOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Drop lines that contain only whitespace (default: true)
    ///
    /// Fully empty lines are always skipped.
    pub skip_blank_lines: bool,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            skip_blank_lines: true,
        }
    }
}

impl CsvReadOptions {
    /// Options for tab-separated text
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::default()
        }
    }
}
