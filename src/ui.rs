use console::Style;
use serde_json::Value;

const RULE_WIDTH: usize = 48;

/// Status tone of a badge or callout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Info,
}

/// One rendered element of a page.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Title(String),
    Subheader(String),
    Text(String),
    /// Short colored status text (green / red).
    Badge {
        tone: Tone,
        text: String,
    },
    /// Boxed message with a leading marker.
    Callout {
        tone: Tone,
        text: String,
    },
    Metric {
        label: String,
        value: String,
        delta: Option<String>,
    },
    Code(String),
    Json(Value),
    Divider,
    Caption(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Color,
    Plain,
}

pub struct ThemeColors {
    pub title: Style,
    pub success: Style,
    pub error: Style,
    pub info: Style,
    pub value: Style,
    pub muted: Style,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Color => ThemeColors {
                title: Style::new().blue().bold(),
                success: Style::new().green().bold(),
                error: Style::new().red().bold(),
                info: Style::new().cyan(),
                value: Style::new().bold(),
                muted: Style::new().dim(),
            },
            Theme::Plain => ThemeColors {
                title: Style::new(),
                success: Style::new(),
                error: Style::new(),
                info: Style::new(),
                value: Style::new(),
                muted: Style::new(),
            },
        }
    }
}

pub struct Renderer {
    colors: ThemeColors,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            colors: theme.colors(),
        }
    }

    /// Renders a page, one widget per block, with a trailing newline.
    pub fn render(&self, widgets: &[Widget]) -> String {
        let mut out = String::new();
        for widget in widgets {
            out.push_str(&self.render_widget(widget));
            out.push('\n');
        }
        out
    }

    pub fn print(&self, widgets: &[Widget]) {
        print!("{}", self.render(widgets));
    }

    fn tone_style(&self, tone: Tone) -> &Style {
        match tone {
            Tone::Success => &self.colors.success,
            Tone::Error => &self.colors.error,
            Tone::Info => &self.colors.info,
        }
    }

    fn render_widget(&self, widget: &Widget) -> String {
        match widget {
            Widget::Title(text) => {
                let underline = "=".repeat(text.chars().count());
                format!(
                    "{}\n{}",
                    self.colors.title.apply_to(text),
                    self.colors.title.apply_to(underline)
                )
            }
            Widget::Subheader(text) => format!("{}", self.colors.value.apply_to(text)),
            Widget::Text(text) => text.clone(),
            Widget::Badge { tone, text } => format!("{}", self.tone_style(*tone).apply_to(text)),
            Widget::Callout { tone, text } => {
                let marker = match tone {
                    Tone::Success => "✔",
                    Tone::Error => "✘",
                    Tone::Info => "ℹ",
                };
                format!("{}", self.tone_style(*tone).apply_to(format!("{marker} {text}")))
            }
            Widget::Metric {
                label,
                value,
                delta,
            } => {
                let value = self.colors.value.apply_to(value);
                match delta {
                    Some(delta) => format!(
                        "{label}: {value} {}",
                        self.colors.success.apply_to(format!("↑ {delta}"))
                    ),
                    None => format!("{label}: {value}"),
                }
            }
            Widget::Code(text) => text
                .lines()
                .map(|line| format!("    {line}"))
                .collect::<Vec<_>>()
                .join("\n"),
            Widget::Json(value) => format!("{value:#}"),
            Widget::Divider => format!("{}", self.colors.muted.apply_to("-".repeat(RULE_WIDTH))),
            Widget::Caption(text) => format!("{}", self.colors.muted.apply_to(text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Renderer {
        Renderer::new(Theme::Plain)
    }

    #[test]
    fn badge_renders_bare_text() {
        let out = plain().render(&[Widget::Badge {
            tone: Tone::Error,
            text: "Value missing...".into(),
        }]);
        assert_eq!(out, "Value missing...\n");
    }

    #[test]
    fn title_is_underlined() {
        let out = plain().render(&[Widget::Title("Age Calculator".into())]);
        assert_eq!(out, "Age Calculator\n==============\n");
    }

    #[test]
    fn metric_shows_delta() {
        let out = plain().render(&[Widget::Metric {
            label: "Model Confidence".into(),
            value: "98.0%".into(),
            delta: Some("High Accuracy".into()),
        }]);
        assert_eq!(out, "Model Confidence: 98.0% ↑ High Accuracy\n");
    }

    #[test]
    fn code_is_indented() {
        let out = plain().render(&[Widget::Code("a, b".into())]);
        assert_eq!(out, "    a, b\n");
    }

    #[test]
    fn json_is_pretty_printed() {
        let out = plain().render(&[Widget::Json(serde_json::json!({ "k": 1 }))]);
        assert_eq!(out, "{\n  \"k\": 1\n}\n");
    }

    fn forced_color() -> Renderer {
        let c = Theme::Color.colors();
        Renderer {
            colors: ThemeColors {
                title: c.title.force_styling(true),
                success: c.success.force_styling(true),
                error: c.error.force_styling(true),
                info: c.info.force_styling(true),
                value: c.value.force_styling(true),
                muted: c.muted.force_styling(true),
            },
        }
    }

    #[test]
    fn success_badge_is_green_and_error_badge_is_red() {
        let renderer = forced_color();
        let ok = renderer.render(&[Widget::Badge {
            tone: Tone::Success,
            text: "25 years and 0 month 1 days.".into(),
        }]);
        let missing = renderer.render(&[Widget::Badge {
            tone: Tone::Error,
            text: "Value missing...".into(),
        }]);

        assert!(ok.contains("\x1b[32m"), "{ok:?}");
        assert!(!ok.contains("\x1b[31m"), "{ok:?}");
        assert!(missing.contains("\x1b[31m"), "{missing:?}");
        assert!(!missing.contains("\x1b[32m"), "{missing:?}");
        assert!(missing.contains("Value missing..."));
    }
}
