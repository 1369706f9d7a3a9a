use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{Confirm, DateSelect, Text};
use tracing::{debug, warn};

use crate::age::CalendarDate;
use crate::analysis::{self, ImageAnalyzer, ImageMetadata, SimulatedAnalyzer};
use crate::cli::{AgeArgs, AnalyzeArgs};
use crate::config::Settings;
use crate::form::{self, AgeFormInput, DobWindow};
use crate::ui::{Renderer, Widget};

/// Runs the age form once. A non-interactive run counts as pressing the button.
pub fn age(settings: &Settings, args: AgeArgs) -> Result<()> {
    let renderer = Renderer::new(settings.theme);
    let window = settings.dob_window(args.min_dob)?;

    let input = if args.interactive {
        renderer.print(&[Widget::Title(form::TITLE.to_string())]);
        prompt_age_form(window)?
    } else {
        AgeFormInput {
            name: args.name.unwrap_or_default(),
            dob: args.dob.as_deref().and_then(parse_dob),
            button_pressed: true,
        }
    };

    let outcome = form::evaluate(&input, window);
    debug!(?outcome, "age form evaluated");

    renderer.print(&form::render(&outcome));
    Ok(())
}

/// Malformed text is treated like an empty field.
fn parse_dob(text: &str) -> Option<CalendarDate> {
    match text.parse() {
        Ok(date) => Some(date),
        Err(err) => {
            warn!(error = %err, "ignoring date of birth");
            None
        }
    }
}

fn prompt_age_form(window: DobWindow) -> Result<AgeFormInput> {
    let name = Text::new(form::NAME_LABEL)
        .prompt()
        .context("Failed to read name")?;

    let dob = DateSelect::new(form::DOB_LABEL)
        .with_min_date(window.min.as_naive())
        .with_max_date(window.today.as_naive())
        .with_starting_date(window.today.as_naive())
        .with_formatter(&|date: chrono::NaiveDate| date.format("%d/%m/%Y").to_string())
        .prompt_skippable()
        .context("Failed to read date of birth")?
        .map(CalendarDate::from);

    let button_pressed = Confirm::new(form::BUTTON_LABEL)
        .with_default(true)
        .prompt()
        .context("Failed to read confirmation")?;

    Ok(AgeFormInput {
        name,
        dob,
        button_pressed,
    })
}

/// Runs the analyze page with the simulated analyzer.
pub async fn analyze(settings: &Settings, args: AnalyzeArgs) -> Result<()> {
    let analyzer = SimulatedAnalyzer::new(Duration::from_millis(args.latency_ms));
    analyze_with(&analyzer, settings, args).await
}

async fn analyze_with<A: ImageAnalyzer>(
    analyzer: &A,
    settings: &Settings,
    args: AnalyzeArgs,
) -> Result<()> {
    let renderer = Renderer::new(settings.theme);
    renderer.print(&[
        Widget::Title(analysis::TITLE.to_string()),
        Widget::Text(analysis::INTRO.to_string()),
    ]);

    let Some(path) = args.path else {
        renderer.print(&analysis::render_empty());
        renderer.print(&footer());
        return Ok(());
    };

    let image = ImageMetadata::from_path(&path)?;
    renderer.print(&analysis::render_preview(&image));

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .context("Invalid spinner template")?,
    );
    spinner.set_message(analysis::SPINNER_MESSAGE);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = analyzer.analyze(&image).await;
    spinner.finish_and_clear();
    let result = result.with_context(|| format!("Failed to analyze {}", path.display()))?;

    renderer.print(&analysis::render_result(&result, args.json));
    renderer.print(&footer());
    Ok(())
}

fn footer() -> Vec<Widget> {
    vec![
        Widget::Divider,
        Widget::Caption(analysis::FOOTER.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisError, AnalysisResult};
    use crate::ui::Theme;
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    /// Records calls and fails every one of them.
    struct FailingAnalyzer {
        calls: Cell<u32>,
    }

    impl ImageAnalyzer for FailingAnalyzer {
        async fn analyze(&self, image: &ImageMetadata) -> Result<AnalysisResult, AnalysisError> {
            self.calls.set(self.calls.get() + 1);
            Err(AnalysisError::Io {
                path: image.file_name.clone().into(),
                source: std::io::Error::other("model unavailable"),
            })
        }
    }

    fn settings() -> Settings {
        Settings {
            today: CalendarDate::new(2025, 1, 1).unwrap(),
            theme: Theme::Plain,
        }
    }

    fn args(path: Option<std::path::PathBuf>) -> AnalyzeArgs {
        AnalyzeArgs {
            path,
            latency_ms: 0,
            json: false,
        }
    }

    #[tokio::test]
    async fn no_image_skips_the_analyzer() {
        let analyzer = FailingAnalyzer { calls: Cell::new(0) };
        analyze_with(&analyzer, &settings(), args(None)).await.unwrap();
        assert_eq!(analyzer.calls.get(), 0);
    }

    #[tokio::test]
    async fn analyzer_errors_propagate() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dog.png");
        fs::write(&path, b"png").unwrap();

        let analyzer = FailingAnalyzer { calls: Cell::new(0) };
        let err = analyze_with(&analyzer, &settings(), args(Some(path)))
            .await
            .unwrap_err();
        assert_eq!(analyzer.calls.get(), 1);
        assert!(err.to_string().starts_with("Failed to analyze"));
    }

    #[test]
    fn malformed_dob_is_treated_as_unset() {
        assert_eq!(parse_dob("not a date"), None);
        assert_eq!(parse_dob("30/02/2001"), None);
        assert_eq!(parse_dob("14/06/2005"), CalendarDate::new(2005, 6, 14).ok());
    }
}
