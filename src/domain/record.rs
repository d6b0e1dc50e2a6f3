use crate::error::{MortgageError, Result};

/// One untyped input line: `loan_amount,rate_name,amortization_years,frequency_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MortgageRecord {
    fields: Vec<String>,
    text: String,
    line: Option<u64>,
}

impl MortgageRecord {
    /// Builds a record from already split fields; the text is the fields
    /// joined by commas.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let text = fields.join(",");
        Self::from_parts(fields, text)
    }

    /// Builds a record from its parsed fields and the line they came from.
    pub fn from_parts(fields: Vec<String>, text: impl Into<String>) -> Self {
        Self {
            fields,
            text: text.into(),
            line: None,
        }
    }

    pub fn with_line(mut self, line: u64) -> Self {
        self.line = Some(line);
        self
    }

    /// Line number in the source, when read from one.
    pub fn line(&self) -> Option<u64> {
        self.line
    }

    pub fn loan_amount(&self) -> Result<&str> {
        self.field(0, "loan amount")
    }

    pub fn rate_name(&self) -> Result<&str> {
        self.field(1, "rate")
    }

    pub fn amortization(&self) -> Result<&str> {
        self.field(2, "amortization")
    }

    pub fn frequency_name(&self) -> Result<&str> {
        self.field(3, "frequency")
    }

    /// The record as it appeared in the source, without surrounding whitespace.
    pub fn raw(&self) -> &str {
        &self.text
    }

    fn field(&self, index: usize, name: &'static str) -> Result<&str> {
        self.fields
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| MortgageError::Conversion {
                field: name,
                value: String::new(),
                reason: "field is missing".to_string(),
            })
    }
}
