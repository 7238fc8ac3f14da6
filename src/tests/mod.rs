#[cfg(test)]
mod formatting_tests {
    use crate::{
        convert_to_html, CheckboxNode, Choice, ControlIds, DocumentNode, DropDownNode, Form,
        FormNode, FormRenderer, NodeFactory, NoopNode, Question, QuestionKind, RadioNode, Render,
        RenderConfig, RenderContext, TitleNode,
    };
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Collects everything a fmt subscriber writes
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap();
            String::from_utf8_lossy(&bytes)
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        let result = tracing::subscriber::with_default(subscriber, f);
        (result, logs.lines())
    }

    fn context_at(indent: usize) -> RenderContext {
        RenderContext::new().with_indent(indent)
    }

    fn color_question() -> Question {
        Question::new(QuestionKind::SingleSelect, "Color")
            .with_required(true)
            .with_choices(["Red", "Blue"])
    }

    fn size_question() -> Question {
        Question::new(QuestionKind::DropDown, "Size").with_choices(["S", "M", "L"])
    }

    fn pets_question() -> Question {
        Question::new(QuestionKind::MultiSelect, "Pets")
            .with_help_text("Pick any")
            .with_choices(["Cat", "Dog"])
    }

    fn mixed_form() -> Form {
        Form {
            title: "Survey".to_string(),
            description: "All kinds".to_string(),
            questions: vec![
                pets_question(),
                Question::new(QuestionKind::TitleGroup, "Part two"),
                color_question(),
                Question::new(QuestionKind::Unsupported("DATE".to_string()), "When?"),
                size_question(),
            ],
        }
    }

    #[test]
    fn test_title_node() {
        let title = TitleNode::new("Lunch", "Pick a dish");
        assert_eq!(
            title.render(&context_at(4)),
            "    <h1>Lunch</h1>\n    <p>Pick a dish</p>"
        );
    }

    #[test]
    fn test_title_node_keeps_empty_description() {
        let title = TitleNode::new("Lunch", "");
        assert_eq!(title.render(&context_at(0)), "<h1>Lunch</h1>\n<p></p>");
    }

    #[test]
    fn test_checkbox_node() {
        let node = CheckboxNode {
            question: pets_question(),
            position: 1,
        };

        let expected = concat!(
            "<div>\n",
            "  <h2>Pets</h2>\n",
            "  <p>Pick any</p>\n",
            "  <div>\n",
            "    <input type=\"checkbox\" id=\"horns\" name=\"horns\" value=\"horns\">\n",
            "    <label>Cat</label>\n",
            "  </div>\n",
            "  <div>\n",
            "    <input type=\"checkbox\" id=\"horns\" name=\"horns\" value=\"horns\">\n",
            "    <label>Dog</label>\n",
            "  </div>\n",
            "</div>"
        );
        assert_eq!(node.render(&context_at(0)), expected);
    }

    #[test]
    fn test_checkbox_ignores_required_flag() {
        let node = CheckboxNode {
            question: pets_question().with_required(true),
            position: 1,
        };
        assert!(!node.render(&context_at(0)).contains("required"));
    }

    #[test]
    fn test_radio_node_without_choices() {
        let node = RadioNode {
            question: Question::new(QuestionKind::SingleSelect, "Empty").with_help_text("Nothing"),
            position: 1,
        };

        assert_eq!(
            node.render(&context_at(2)),
            "  <div>\n    <h2>Empty</h2>\n    <p>Nothing</p>\n  </div>"
        );
    }

    #[test]
    fn test_checkbox_without_choices_or_help() {
        let node = CheckboxNode {
            question: Question::new(QuestionKind::MultiSelect, "Empty"),
            position: 1,
        };

        let output = node.render(&context_at(0));
        assert_eq!(output, "<div>\n  <h2>Empty</h2>\n</div>");
        assert!(!output.contains("<input"));
        assert!(!output.contains("<p>"));
    }

    #[test]
    fn test_single_select_scenario() {
        let node = RadioNode {
            question: color_question(),
            position: 1,
        };
        let output = node.render(&context_at(0));

        assert!(output.contains("  <h2>Color</h2>\n"));
        assert!(!output.contains("<p>"));

        let radios: Vec<&str> = output
            .lines()
            .filter(|line| line.contains("type=\"radio\""))
            .collect();
        assert_eq!(radios.len(), 2);
        assert!(radios.iter().all(|line| line.ends_with(" required>")));

        let labels: Vec<&str> = output
            .lines()
            .filter(|line| line.contains("<label>"))
            .map(str::trim)
            .collect();
        assert_eq!(labels, vec!["<label>Red</label>", "<label>Blue</label>"]);
    }

    #[test]
    fn test_optional_radio_has_no_required_marker() {
        let node = RadioNode {
            question: color_question().with_required(false),
            position: 1,
        };
        let output = node.render(&context_at(0));

        assert!(output.contains(
            "    <input type=\"radio\" id=\"horns\" name=\"horns\" value=\"horns\">\n"
        ));
        assert!(!output.contains("required"));
    }

    #[test]
    fn test_drop_down_scenario() {
        let node = DropDownNode {
            question: size_question(),
            position: 1,
        };

        let expected = concat!(
            "<div>\n",
            "  <h2>Size</h2>\n",
            "  <select id=\"choice\" name=\"choice\">\n",
            "    <option value=\"noselect\" disabled selected>Please select</option>\n",
            "    <option value=\"horns\">S</option>\n",
            "    <option value=\"horns\">M</option>\n",
            "    <option value=\"horns\">L</option>\n",
            "  </select>\n",
            "</div>"
        );
        assert_eq!(node.render(&context_at(0)), expected);
    }

    #[test]
    fn test_required_drop_down() {
        let node = DropDownNode {
            question: size_question().with_required(true),
            position: 1,
        };
        assert!(node
            .render(&context_at(0))
            .contains("  <select id=\"choice\" name=\"choice\" required>\n"));
    }

    #[test]
    fn test_drop_down_placeholder_label_is_configurable() {
        let node = DropDownNode {
            question: size_question(),
            position: 1,
        };
        let config = RenderConfig::new().with_placeholder_label("選択して下さい");
        let output = node.render(&RenderContext::with_config(config));

        assert!(output.contains("disabled selected>選択して下さい</option>"));
    }

    #[test]
    fn test_positional_ids() {
        let config = RenderConfig::new().with_control_ids(ControlIds::Positional);
        let context = RenderContext::with_config(config);

        let radio = RadioNode {
            question: color_question(),
            position: 3,
        }
        .render(&context);
        assert!(radio.contains("<input type=\"radio\" id=\"q3-1\" name=\"q3\" value=\"1\" required>"));
        assert!(radio.contains("<input type=\"radio\" id=\"q3-2\" name=\"q3\" value=\"2\" required>"));

        let drop_down = DropDownNode {
            question: size_question(),
            position: 4,
        }
        .render(&context);
        assert!(drop_down.contains("<select id=\"q4\" name=\"q4\">"));
        assert!(drop_down.contains("<option value=\"3\">L</option>"));
    }

    #[test]
    fn test_markup_in_text_is_escaped() {
        let node = CheckboxNode {
            question: Question::new(QuestionKind::MultiSelect, "</div><script>")
                .with_choices(["A & B"]),
            position: 1,
        };
        let output = node.render(&context_at(0));

        assert!(output.contains("<h2>&lt;/div&gt;&lt;script&gt;</h2>"));
        assert!(output.contains("<label>A &amp; B</label>"));
        assert_eq!(output.matches("<div>").count(), output.matches("</div>").count());
    }

    #[test]
    fn test_noop_node_renders_nothing() {
        let node = NoopNode {
            kind: QuestionKind::Unsupported("GRID".to_string()),
        };
        assert_eq!(node.render(&context_at(6)), "");
    }

    #[test]
    fn test_factory_maps_kinds() {
        let factory = NodeFactory;

        assert!(matches!(
            factory.build_node(&pets_question(), 1),
            FormNode::Checkbox(_)
        ));
        assert!(matches!(
            factory.build_node(&color_question(), 2),
            FormNode::Radio(_)
        ));
        assert!(matches!(
            factory.build_node(&size_question(), 3),
            FormNode::DropDown(DropDownNode { position: 3, .. })
        ));

        let (node, logs) = with_captured_logs(|| {
            factory.build_node(&Question::new(QuestionKind::TitleGroup, "Part two"), 4)
        });
        assert!(matches!(node, FormNode::Noop(_)));
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("SECTION_HEADER is not supported yet"));
    }

    #[test]
    fn test_unsupported_kind_logs_once() {
        let (node, logs) = with_captured_logs(|| {
            NodeFactory.build_node(
                &Question::new(QuestionKind::Unsupported("DATE".to_string()), "When?"),
                1,
            )
        });

        assert_eq!(node.render(&context_at(0)), "");
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("DATE"));
        assert!(logs[0].contains("not supported"));
    }

    #[test]
    fn test_empty_form_scenario() {
        let html = convert_to_html(&Form::default(), RenderConfig::default());
        assert_eq!(
            html,
            "<html>\n  <body>\n    <h1></h1>\n    <p></p>\n  </body>\n</html>"
        );
    }

    #[test]
    fn test_document_skips_empty_children() {
        let document = DocumentNode::new(vec![
            FormNode::Title(TitleNode::new("T", "D")),
            FormNode::Noop(NoopNode {
                kind: QuestionKind::Unsupported("DATE".to_string()),
            }),
        ]);

        assert_eq!(
            document.render(&context_at(0)),
            "<html>\n  <body>\n    <h1>T</h1>\n    <p>D</p>\n  </body>\n</html>"
        );
    }

    #[test]
    fn test_unsupported_question_between_supported_ones() {
        let form = Form {
            title: "Order".to_string(),
            description: String::new(),
            questions: vec![
                color_question(),
                Question::new(QuestionKind::Unsupported("DATE".to_string()), "When?"),
                size_question(),
            ],
        };

        let (html, logs) =
            with_captured_logs(|| convert_to_html(&form, RenderConfig::default()));

        assert_eq!(html.matches("<h2>").count(), 2);
        assert!(!html.contains("When?"));
        assert!(!html.lines().any(|line| line.trim().is_empty()));

        let diagnostics: Vec<&String> = logs
            .iter()
            .filter(|line| line.contains("not supported"))
            .collect();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].contains("DATE"));
    }

    #[test]
    fn test_questions_keep_source_order() {
        let html = convert_to_html(&mixed_form(), RenderConfig::default());

        let pets = html.find("<h2>Pets</h2>").unwrap();
        let color = html.find("<h2>Color</h2>").unwrap();
        let size = html.find("<h2>Size</h2>").unwrap();
        assert!(html.find("<h1>Survey</h1>").unwrap() < pets);
        assert!(pets < color && color < size);
    }

    #[test]
    fn test_document_tags_are_balanced() {
        let renderer = FormRenderer::default();
        for form in [Form::default(), mixed_form()] {
            let html = renderer.render(&form, 3);
            let lines: Vec<&str> = html.lines().map(str::trim).collect();

            assert_eq!(lines.iter().filter(|l| **l == "<html>").count(), 1);
            assert_eq!(lines.iter().filter(|l| **l == "</html>").count(), 1);
            assert_eq!(lines.iter().filter(|l| **l == "<body>").count(), 1);
            assert_eq!(lines.iter().filter(|l| **l == "</body>").count(), 1);

            assert_eq!(lines.first(), Some(&"<html>"));
            assert_eq!(lines.get(1), Some(&"<body>"));
            assert_eq!(lines.get(lines.len() - 2), Some(&"</body>"));
            assert_eq!(lines.last(), Some(&"</html>"));
        }
    }

    #[test]
    fn test_elements_nest_properly() {
        let html = convert_to_html(&mixed_form(), RenderConfig::default());

        let mut open: Vec<String> = Vec::new();
        for line in html.lines().map(str::trim) {
            if let Some(tag) = line.strip_prefix("</") {
                let name = tag.trim_end_matches('>');
                assert_eq!(open.pop().as_deref(), Some(name), "unexpected close of {}", name);
            } else if line == "<html>" || line == "<body>" || line == "<div>" {
                open.push(line[1..line.len() - 1].to_string());
            } else if line.starts_with("<select") {
                open.push("select".to_string());
            }
        }
        assert!(open.is_empty(), "unclosed elements: {:?}", open);
    }

    #[test]
    fn test_indent_floor() {
        let form = mixed_form();
        for increment in [0, 1, 2, 4] {
            let renderer = FormRenderer::new(RenderConfig::new().with_indent_increment(increment));
            for start in [0, 1, 2, 5, 10] {
                let html = renderer.render(&form, start);
                let floor = " ".repeat(start);
                for line in html.lines() {
                    assert!(
                        line.starts_with(&floor),
                        "line {:?} indented less than {} (step {})",
                        line,
                        start,
                        increment
                    );
                }
            }
        }
    }

    #[test]
    fn test_multiline_text_keeps_indent_floor() {
        let form = Form {
            title: "Line one\nLine two".to_string(),
            description: "a\r\nb".to_string(),
            questions: vec![pets_question().with_help_text("first\nsecond")],
        };

        let html = FormRenderer::default().render(&form, 2);
        assert!(html.lines().all(|line| line.starts_with("  ")));
        assert!(html.contains("<h1>Line one<br>Line two</h1>"));
        assert!(html.contains("<p>first<br>second</p>"));
    }

    #[test]
    fn test_indent_increment_is_configurable() {
        let renderer = FormRenderer::new(RenderConfig::new().with_indent_increment(4));
        let html = renderer.render(&Form::default(), 0);
        assert_eq!(
            html,
            "<html>\n    <body>\n        <h1></h1>\n        <p></p>\n    </body>\n</html>"
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let context = context_at(2);
        let nodes = vec![
            FormNode::Title(TitleNode::new("T", "D")),
            FormNode::Checkbox(CheckboxNode {
                question: pets_question(),
                position: 1,
            }),
            FormNode::Radio(RadioNode {
                question: color_question(),
                position: 2,
            }),
            FormNode::DropDown(DropDownNode {
                question: size_question(),
                position: 3,
            }),
        ];

        for node in &nodes {
            assert_eq!(node.render(&context), node.render(&context));
        }

        let document = FormRenderer::default().build_document(&mixed_form());
        assert_eq!(document.render(&context), document.render(&context));
    }

    #[test]
    fn test_no_trailing_line_break() {
        let html = convert_to_html(&mixed_form(), RenderConfig::default());
        assert!(!html.ends_with('\n'));

        let fragment = CheckboxNode {
            question: pets_question(),
            position: 1,
        }
        .render(&context_at(0));
        assert!(!fragment.ends_with('\n'));
    }

    #[test]
    fn test_build_document_puts_title_first() {
        let document = FormRenderer::default().build_document(&mixed_form());

        assert_eq!(document.children.len(), 6);
        assert!(matches!(
            &document.children[0],
            FormNode::Title(TitleNode { title, .. }) if title == "Survey"
        ));
        assert!(matches!(&document.children[2], FormNode::Noop(_)));
        assert!(matches!(
            &document.children[3],
            FormNode::Radio(RadioNode { position: 3, .. })
        ));
    }

    #[test]
    fn test_choice_labels_pass_through() {
        let question = Question {
            kind: QuestionKind::MultiSelect,
            title: "Fruit".to_string(),
            help_text: String::new(),
            required: false,
            choices: vec![Choice::new("りんご"), Choice::new("Ünïcödé")],
        };
        let output = CheckboxNode {
            question,
            position: 1,
        }
        .render(&context_at(0));

        assert!(output.contains("<label>りんご</label>"));
        assert!(output.contains("<label>Ünïcödé</label>"));
    }
}
