use serde::Deserialize;

// Raw structures mirroring the exported questionnaire JSON

#[derive(Debug, Deserialize)]
pub struct RawForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
pub struct RawItem {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "helpText")]
    pub help_text: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub choices: Vec<RawChoice>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawChoice {
    Plain(String),
    Object { value: String },
}

impl RawChoice {
    pub fn into_label(self) -> String {
        match self {
            RawChoice::Plain(value) | RawChoice::Object { value } => value,
        }
    }
}

// Parsed data structures - what the renderer consumes

/// The declared kind of a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// Any number of choices may be ticked (`CHECKBOX`)
    MultiSelect,
    /// Exactly one choice (`MULTIPLE_CHOICE`)
    SingleSelect,
    /// One choice picked from a drop-down (`LIST`)
    DropDown,
    /// Section header grouping the questions that follow
    TitleGroup,
    /// Anything else, keeping the name the source used
    Unsupported(String),
}

impl QuestionKind {
    pub fn from_type_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "CHECKBOX" => QuestionKind::MultiSelect,
            "MULTIPLE_CHOICE" => QuestionKind::SingleSelect,
            "LIST" => QuestionKind::DropDown,
            "SECTION_HEADER" => QuestionKind::TitleGroup,
            _ => QuestionKind::Unsupported(name.trim().to_string()),
        }
    }

    /// Name used in diagnostics, in the source's own spelling
    pub fn name(&self) -> &str {
        match self {
            QuestionKind::MultiSelect => "CHECKBOX",
            QuestionKind::SingleSelect => "MULTIPLE_CHOICE",
            QuestionKind::DropDown => "LIST",
            QuestionKind::TitleGroup => "SECTION_HEADER",
            QuestionKind::Unsupported(name) => name,
        }
    }
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
}

impl Choice {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub kind: QuestionKind,
    pub title: String,
    pub help_text: String,
    pub required: bool,
    pub choices: Vec<Choice>,
}

impl Question {
    pub fn new(kind: QuestionKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            help_text: String::new(),
            required: false,
            choices: Vec::new(),
        }
    }

    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = help_text.into();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_choices<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = labels.into_iter().map(Choice::new).collect();
        self
    }
}

/// A whole questionnaire, resolved from its source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
}
