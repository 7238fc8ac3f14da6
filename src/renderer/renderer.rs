use tracing::info;

use crate::parser::*;
use crate::renderer::renders::*;
use crate::renderer::traits::*;

/// Picks the node that draws each question
pub struct NodeFactory;

impl NodeFactory {
    /// Build the node for `question`, found at 1-based `position` in its form.
    ///
    /// Every kind maps to some node; kinds without a renderer get a
    /// [`NoopNode`] and one diagnostic.
    pub fn build_node(&self, question: &Question, position: usize) -> FormNode {
        match &question.kind {
            QuestionKind::MultiSelect => FormNode::Checkbox(CheckboxNode {
                question: question.clone(),
                position,
            }),
            QuestionKind::SingleSelect => FormNode::Radio(RadioNode {
                question: question.clone(),
                position,
            }),
            QuestionKind::DropDown => FormNode::DropDown(DropDownNode {
                question: question.clone(),
                position,
            }),
            kind @ (QuestionKind::TitleGroup | QuestionKind::Unsupported(_)) => {
                info!(kind = %kind, "{} is not supported yet", kind);
                FormNode::Noop(NoopNode { kind: kind.clone() })
            }
        }
    }
}

/// Renders whole forms as HTML documents
pub struct FormRenderer {
    config: RenderConfig,
}

impl FormRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Title node first, then one node per question in form order
    pub fn build_document(&self, form: &Form) -> DocumentNode {
        let factory = NodeFactory;

        let mut children = Vec::with_capacity(form.questions.len() + 1);
        children.push(FormNode::Title(TitleNode::new(
            form.title.as_str(),
            form.description.as_str(),
        )));

        for (i, question) in form.questions.iter().enumerate() {
            children.push(factory.build_node(question, i + 1));
        }

        DocumentNode::new(children)
    }

    pub fn render(&self, form: &Form, indent_start: usize) -> String {
        let context = RenderContext::with_config(self.config.clone()).with_indent(indent_start);
        self.build_document(form).render(&context)
    }
}

impl Default for FormRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}
