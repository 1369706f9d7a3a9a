use anyhow::{Result, ensure};
use chrono::Utc;

use crate::age::CalendarDate;
use crate::form::DobWindow;
use crate::ui::Theme;

/// Process-wide settings resolved from flags and environment.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub today: CalendarDate,
    pub theme: Theme,
}

impl Settings {
    pub fn resolve(today: Option<CalendarDate>, no_color: bool) -> Self {
        let today = today.unwrap_or_else(|| Utc::now().date_naive().into());
        let theme = if no_color || !console::colors_enabled() {
            Theme::Plain
        } else {
            Theme::Color
        };

        Self { today, theme }
    }

    /// Birth dates the form accepts: `[min, today]`.
    pub fn dob_window(&self, min: CalendarDate) -> Result<DobWindow> {
        ensure!(
            min <= self.today,
            "earliest date of birth {min} is after today ({})",
            self.today
        );
        Ok(DobWindow {
            min,
            today: self.today,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn explicit_today_wins() {
        let settings = Settings::resolve(Some(date(2025, 1, 1)), true);
        assert_eq!(settings.today, date(2025, 1, 1));
        assert_eq!(settings.theme, Theme::Plain);
    }

    #[test]
    fn defaults_to_current_date() {
        let settings = Settings::resolve(None, true);
        let now: CalendarDate = Utc::now().date_naive().into();
        // Allow for the test straddling midnight UTC.
        assert!(now.days_since(settings.today) <= 1);
    }

    #[test]
    fn window_rejects_min_after_today() {
        let settings = Settings::resolve(Some(date(2025, 1, 1)), true);
        assert!(settings.dob_window(date(2025, 1, 2)).is_err());
        assert_eq!(
            settings.dob_window(date(2000, 1, 1)).unwrap(),
            DobWindow {
                min: date(2000, 1, 1),
                today: date(2025, 1, 1),
            }
        );
    }
}
