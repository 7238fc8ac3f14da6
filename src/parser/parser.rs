use anyhow::{Context, Result};
use tracing::debug;

use crate::parser::types::*;

// Parser for converting the raw questionnaire export to typed structures
pub struct FormParser {
    raw: RawForm,
}

impl FormParser {
    pub fn new(raw: RawForm) -> Self {
        Self { raw }
    }

    pub fn from_json(json: &[u8]) -> Result<Self> {
        let raw: RawForm =
            serde_json::from_slice(json).context("Failed to parse questionnaire JSON")?;
        Ok(Self::new(raw))
    }

    pub fn parse_form(self) -> Form {
        let RawForm {
            title,
            description,
            items,
        } = self.raw;

        let questions: Vec<Question> = items.into_iter().map(Self::parse_item).collect();
        debug!(title = %title, questions = questions.len(), "parsed questionnaire");

        Form {
            title,
            description,
            questions,
        }
    }

    fn parse_item(item: RawItem) -> Question {
        Question {
            kind: QuestionKind::from_type_name(&item.item_type),
            title: item.title,
            help_text: item.help_text,
            required: item.required,
            choices: item
                .choices
                .into_iter()
                .map(|c| Choice::new(c.into_label()))
                .collect(),
        }
    }
}

/// Parse a questionnaire export straight into a [`Form`]
pub fn parse_form(json: &[u8]) -> Result<Form> {
    Ok(FormParser::from_json(json)?.parse_form())
}
