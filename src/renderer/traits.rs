/// How identifiers are written onto form controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlIds {
    /// Fixed literal placeholders, identical for every control
    #[default]
    Placeholder,
    /// Derived from question and choice positions (`q1`, `q1-2`, ...)
    Positional,
}

/// Formatting configuration shared by every node of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Spaces added per nesting level
    pub indent_increment: usize,
    /// Label of the disabled first option of a drop-down
    pub placeholder_label: String,
    pub control_ids: ControlIds,
}

impl RenderConfig {
    pub const DEFAULT_INDENT_INCREMENT: usize = 2;
    pub const DEFAULT_PLACEHOLDER_LABEL: &'static str = "Please select";

    pub fn new() -> Self {
        Self {
            indent_increment: Self::DEFAULT_INDENT_INCREMENT,
            placeholder_label: Self::DEFAULT_PLACEHOLDER_LABEL.to_string(),
            control_ids: ControlIds::Placeholder,
        }
    }

    pub fn with_indent_increment(mut self, increment: usize) -> Self {
        self.indent_increment = increment;
        self
    }

    pub fn with_placeholder_label(mut self, label: impl Into<String>) -> Self {
        self.placeholder_label = label.into();
        self
    }

    pub fn with_control_ids(mut self, control_ids: ControlIds) -> Self {
        self.control_ids = control_ids;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Starting indentation plus the configuration it is measured in
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub indent_start: usize,
    pub config: RenderConfig,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            indent_start: 0,
            config,
        }
    }

    pub fn with_indent(&self, indent_start: usize) -> Self {
        Self {
            indent_start,
            config: self.config.clone(),
        }
    }

    /// Context for children nested `levels` below this one
    pub fn nested(&self, levels: usize) -> Self {
        self.with_indent(self.indent_width(levels))
    }

    /// Width in spaces of the line prefix `level` steps below the start
    pub fn indent_width(&self, level: usize) -> usize {
        self.indent_start + level * self.config.indent_increment
    }

    pub fn indent(&self, level: usize) -> String {
        " ".repeat(self.indent_width(level))
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Core rendering trait for every markup-producing node.
///
/// Implementations return a complete fragment whose lines all start at or
/// beyond `context.indent_start`, without a trailing line break. Nodes with
/// nothing to show return an empty string.
pub trait Render {
    fn render(&self, context: &RenderContext) -> String;
}
