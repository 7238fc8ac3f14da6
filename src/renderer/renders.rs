use crate::parser::*;
use crate::renderer::components::*;
use crate::renderer::traits::*;

/// Form heading: title and description
#[derive(Debug, Clone)]
pub struct TitleNode {
    pub title: String,
    pub description: String,
}

impl TitleNode {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Stand-in for questions of a kind nothing knows how to draw
#[derive(Debug, Clone)]
pub struct NoopNode {
    pub kind: QuestionKind,
}

/// Multi-select question, drawn as checkboxes
#[derive(Debug, Clone)]
pub struct CheckboxNode {
    pub question: Question,
    pub position: usize,
}

/// Single-select question, drawn as radio buttons
#[derive(Debug, Clone)]
pub struct RadioNode {
    pub question: Question,
    pub position: usize,
}

/// Drop-down question, drawn as a `<select>`
#[derive(Debug, Clone)]
pub struct DropDownNode {
    pub question: Question,
    pub position: usize,
}

/// Every kind of node a document can hold
#[derive(Debug, Clone)]
pub enum FormNode {
    Title(TitleNode),
    Checkbox(CheckboxNode),
    Radio(RadioNode),
    DropDown(DropDownNode),
    Noop(NoopNode),
}

/// Root of the output: `<html>` and `<body>` around the child nodes
#[derive(Debug, Clone)]
pub struct DocumentNode {
    pub children: Vec<FormNode>,
}

impl DocumentNode {
    pub fn new(children: Vec<FormNode>) -> Self {
        Self { children }
    }
}

impl Render for TitleNode {
    fn render(&self, context: &RenderContext) -> String {
        let indent = context.indent(0);
        let text_renderer = TextRenderer;

        let mut output = format!("{}<h1>{}</h1>\n", indent, text_renderer.render_text(&self.title));
        // The paragraph stays even when there is no description
        output.push_str(&format!(
            "{}<p>{}</p>",
            indent,
            text_renderer.render_text(&self.description)
        ));

        output
    }
}

impl Render for NoopNode {
    fn render(&self, _context: &RenderContext) -> String {
        String::new()
    }
}

/// Wrap a question body in its `<div>`, heading and optional help paragraph.
/// `body` is already indented one level in and ends with a line break.
fn render_question_block(question: &Question, body: &str, context: &RenderContext) -> String {
    let outer = context.indent(0);
    let inner = context.indent(1);
    let text_renderer = TextRenderer;

    let mut output = format!("{}<div>\n", outer);
    output.push_str(&format!(
        "{}<h2>{}</h2>\n",
        inner,
        text_renderer.render_text(&question.title)
    ));

    if !question.help_text.is_empty() {
        output.push_str(&format!(
            "{}<p>{}</p>\n",
            inner,
            text_renderer.render_text(&question.help_text)
        ));
    }

    output.push_str(body);
    output.push_str(&format!("{}</div>", outer));

    output
}

/// One `<div>` per choice holding an input and its label
fn render_choice_blocks(
    question: &Question,
    input_type: &str,
    required: &str,
    controls: &ControlRenderer,
    context: &RenderContext,
) -> String {
    let block_indent = context.indent(1);
    let control_indent = context.indent(2);
    let text_renderer = TextRenderer;

    let mut output = String::new();
    for (i, choice) in question.choices.iter().enumerate() {
        output.push_str(&format!("{}<div>\n", block_indent));
        output.push_str(&format!(
            "{}<input type=\"{}\" {}{}>\n",
            control_indent,
            input_type,
            controls.render_choice_input_attrs(i + 1),
            required
        ));
        output.push_str(&format!(
            "{}<label>{}</label>\n",
            control_indent,
            text_renderer.render_text(&choice.label)
        ));
        output.push_str(&format!("{}</div>\n", block_indent));
    }

    output
}

impl Render for CheckboxNode {
    fn render(&self, context: &RenderContext) -> String {
        let controls = ControlRenderer::new(context.config.control_ids, self.position);

        // Checkboxes only support `required` per box, which would force every
        // box to be ticked, so the question-level flag is not carried.
        let body = render_choice_blocks(&self.question, "checkbox", "", &controls, context);

        render_question_block(&self.question, &body, context)
    }
}

impl Render for RadioNode {
    fn render(&self, context: &RenderContext) -> String {
        let controls = ControlRenderer::new(context.config.control_ids, self.position);
        let required = controls.render_required(self.question.required);

        let body = render_choice_blocks(&self.question, "radio", required, &controls, context);

        render_question_block(&self.question, &body, context)
    }
}

impl Render for DropDownNode {
    fn render(&self, context: &RenderContext) -> String {
        let controls = ControlRenderer::new(context.config.control_ids, self.position);
        let text_renderer = TextRenderer;
        let select_indent = context.indent(1);
        let option_indent = context.indent(2);

        let mut body = format!(
            "{}<select {}{}>\n",
            select_indent,
            controls.render_select_attrs(),
            controls.render_required(self.question.required)
        );

        // NOTE: once a real option is picked the placeholder can't be chosen again
        body.push_str(&format!(
            "{}<option value=\"{}\" disabled selected>{}</option>\n",
            option_indent,
            controls.render_no_selection_value(),
            text_renderer.render_text(&context.config.placeholder_label)
        ));

        for (i, choice) in self.question.choices.iter().enumerate() {
            body.push_str(&format!(
                "{}<option value=\"{}\">{}</option>\n",
                option_indent,
                controls.render_option_value(i + 1),
                text_renderer.render_text(&choice.label)
            ));
        }

        body.push_str(&format!("{}</select>\n", select_indent));

        render_question_block(&self.question, &body, context)
    }
}

impl Render for FormNode {
    fn render(&self, context: &RenderContext) -> String {
        match self {
            FormNode::Title(title) => title.render(context),
            FormNode::Checkbox(checkbox) => checkbox.render(context),
            FormNode::Radio(radio) => radio.render(context),
            FormNode::DropDown(drop_down) => drop_down.render(context),
            FormNode::Noop(noop) => noop.render(context),
        }
    }
}

impl Render for DocumentNode {
    fn render(&self, context: &RenderContext) -> String {
        let root_indent = context.indent(0);
        let body_indent = context.indent(1);

        let mut output = format!("{}<html>\n", root_indent);
        output.push_str(&format!("{}<body>\n", body_indent));

        let child_context = context.nested(2);
        for child in &self.children {
            let fragment = child.render(&child_context);
            // Intentional: an unsupported question renders as "" and must add
            // no line at all. Writing its '\n' would leave a blank line below
            // the indent floor.
            if fragment.is_empty() {
                continue;
            }
            output.push_str(&fragment);
            output.push('\n');
        }

        output.push_str(&format!("{}</body>\n", body_indent));
        output.push_str(&format!("{}</html>", root_indent));

        output
    }
}
