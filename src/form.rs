//! The "Calculate" age form: input state in, page widgets out.

use tracing::{debug, warn};

use crate::age::{AgeResult, CalendarDate, compute_age};
use crate::ui::{Tone, Widget};

pub const TITLE: &str = "Age Calculator";
pub const NAME_LABEL: &str = "Enter your name :";
pub const DOB_LABEL: &str = "Enter your DOB :";
pub const BUTTON_LABEL: &str = "Calculate";
pub const MISSING_VALUE: &str = "Value missing...";

/// What the form holds at the moment the page is drawn.
#[derive(Debug, Clone, Default)]
pub struct AgeFormInput {
    pub name: String,
    pub dob: Option<CalendarDate>,
    pub button_pressed: bool,
}

/// Range of birth dates the date picker offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DobWindow {
    pub min: CalendarDate,
    pub today: CalendarDate,
}

impl DobWindow {
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.min <= date && date <= self.today
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Button not pressed yet.
    Idle,
    /// Button pressed with a field empty or out of range.
    Missing,
    Computed { name: String, age: AgeResult },
}

pub fn evaluate(input: &AgeFormInput, window: DobWindow) -> FormOutcome {
    if !input.button_pressed {
        return FormOutcome::Idle;
    }

    let dob = match input.dob {
        Some(dob) if window.contains(dob) => dob,
        Some(dob) => {
            debug!(%dob, min = %window.min, today = %window.today, "birth date outside picker range");
            return FormOutcome::Missing;
        }
        None => return FormOutcome::Missing,
    };

    if input.name.is_empty() {
        return FormOutcome::Missing;
    }

    match compute_age(dob, window.today) {
        Ok(age) => FormOutcome::Computed {
            name: input.name.clone(),
            age,
        },
        Err(err) => {
            warn!(error = %err, "age computation rejected input");
            FormOutcome::Missing
        }
    }
}

/// Result area of the page. Idle and missing input look the same.
pub fn render(outcome: &FormOutcome) -> Vec<Widget> {
    match outcome {
        FormOutcome::Computed { name, age } => vec![
            Widget::Text(format!("{name}, Your age is :")),
            Widget::Badge {
                tone: Tone::Success,
                text: age.to_string(),
            },
        ],
        FormOutcome::Idle | FormOutcome::Missing => vec![Widget::Badge {
            tone: Tone::Error,
            text: MISSING_VALUE.to_string(),
        }],
    }
}
