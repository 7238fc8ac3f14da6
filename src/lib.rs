//! # formhtml
//!
//! Turns a questionnaire export (title, description and typed questions)
//! into an indented HTML document. Checkbox, multiple-choice and list
//! questions become form controls; other kinds are skipped with a log line.

pub mod parser;
pub mod renderer;
pub mod source;

pub use parser::*;
pub use renderer::*;
pub use source::*;

/// Render `form` as a complete document starting at column zero
pub fn convert_to_html(form: &Form, config: RenderConfig) -> String {
    FormRenderer::new(config).render(form, 0)
}

#[cfg(test)]
mod tests;
