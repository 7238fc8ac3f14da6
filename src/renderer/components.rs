use crate::renderer::traits::*;

/// Helper for rendering literal questionnaire text
pub struct TextRenderer;

impl TextRenderer {
    /// Escape HTML special characters and turn line breaks into `<br>`
    /// so multi-line text stays on one indented line.
    pub fn render_text(&self, text: &str) -> String {
        let escaped = text
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;");

        escaped
            .replace("\r\n", "<br>")
            .replace(['\r', '\n'], "<br>")
    }
}

/// Helper for rendering the attributes of form controls.
///
/// `position` is the 1-based position of the question within the form.
pub struct ControlRenderer {
    ids: ControlIds,
    position: usize,
}

impl ControlRenderer {
    const PLACEHOLDER_INPUT: &'static str = "horns";
    const PLACEHOLDER_SELECT: &'static str = "choice";
    const NO_SELECTION_VALUE: &'static str = "noselect";

    pub fn new(ids: ControlIds, position: usize) -> Self {
        Self { ids, position }
    }

    fn question_name(&self) -> String {
        format!("q{}", self.position)
    }

    /// `id`, `name` and `value` of the input for the `choice`-th option (1-based)
    pub fn render_choice_input_attrs(&self, choice: usize) -> String {
        match self.ids {
            ControlIds::Placeholder => format!(
                "id=\"{0}\" name=\"{0}\" value=\"{0}\"",
                Self::PLACEHOLDER_INPUT
            ),
            ControlIds::Positional => format!(
                "id=\"{name}-{choice}\" name=\"{name}\" value=\"{choice}\"",
                name = self.question_name()
            ),
        }
    }

    pub fn render_select_attrs(&self) -> String {
        let name = match self.ids {
            ControlIds::Placeholder => Self::PLACEHOLDER_SELECT.to_string(),
            ControlIds::Positional => self.question_name(),
        };
        format!("id=\"{0}\" name=\"{0}\"", name)
    }

    pub fn render_option_value(&self, choice: usize) -> String {
        match self.ids {
            ControlIds::Placeholder => Self::PLACEHOLDER_INPUT.to_string(),
            ControlIds::Positional => choice.to_string(),
        }
    }

    pub fn render_no_selection_value(&self) -> &'static str {
        Self::NO_SELECTION_VALUE
    }

    /// Boolean `required` attribute, with its leading space
    pub fn render_required(&self, required: bool) -> &'static str {
        if required {
            " required"
        } else {
            ""
        }
    }
}
