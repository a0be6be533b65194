//! Typed values for the showcase widgets.
//!
//! A fresh [`WidgetValues`] is derived from every request; nothing here
//! survives past the render cycle that built it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::error::{AppError, Result};

pub const FRAMEWORKS: &[&str] = &["Streamlit", "Dash", "Gradio", "Voila"];
pub const ROLES: &[&str] = &["Data Scientist", "Engineer", "Analyst"];

pub const SLIDER_MIN: i64 = 0;
pub const SLIDER_MAX: i64 = 100;
pub const QUANTITY_MIN: i64 = 1;
pub const QUANTITY_MAX: i64 = 10;
pub const QUANTITY_STEP: i64 = 1;
pub const NAME_MAX_LEN: u64 = 256;
pub const FEEDBACK_MAX_LEN: u64 = 4096;
pub const FEEDBACK_ROWS: u32 = 6;

pub const DEFAULT_FRAMEWORK_INDEX: usize = 0;
pub const DEFAULT_SLIDER: i64 = 25;
pub const DEFAULT_AGREE: bool = true;
pub const DEFAULT_ROLE_INDEX: usize = 1;
pub const DEFAULT_QUANTITY: i64 = 3;
pub const DEFAULT_COLOR: &str = "#FF4B4B";

pub const NAME_PLACEHOLDER: &str = "Streamlit learner";

/// Earliest date the date input offers
pub fn min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN)
}

pub mod labels {
    pub const NAME: &str = "What's your name?";
    pub const FRAMEWORK: &str = "Choose your favorite data app framework";
    pub const SLIDER: &str = "Pick a number";
    pub const AGREE: &str = "I understand how checkboxes return booleans";
    pub const ROLE: &str = "Select your role";
    pub const BIRTHDAY: &str = "Pick a memorable date";
    pub const FILE: &str = "Upload a CSV to preview its contents";
    pub const QUANTITY: &str = "How many samples?";
    pub const COLOR: &str = "Pick a highlight color";
    pub const FEEDBACK: &str = "What would you build with Streamlit?";
    pub const SUBMIT: &str = "Send feedback";
    pub const DARK_MODE: &str = "Dark mode";
}

/// Raw widget fields as they arrive in a query string or form body.
///
/// Every field is optional; absence means "use the default" on a first
/// render and "unchecked" for boolean controls on a submitted form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetForm {
    pub name: Option<String>,
    pub framework: Option<String>,
    pub slider: Option<String>,
    pub agree: Option<String>,
    pub role: Option<String>,
    pub birthday: Option<String>,
    pub quantity: Option<String>,
    pub color: Option<String>,
    pub feedback: Option<String>,
    pub submit: Option<String>,
    pub dark_mode: Option<String>,
}

/// Current value held by each widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WidgetValues {
    #[validate(length(max = NAME_MAX_LEN))]
    pub name: String,
    pub framework: String,
    #[validate(range(min = SLIDER_MIN, max = SLIDER_MAX))]
    pub slider: i64,
    pub agree: bool,
    pub role: String,
    pub birthday: NaiveDate,
    #[validate(range(min = QUANTITY_MIN, max = QUANTITY_MAX))]
    pub quantity: i64,
    pub color: String,
    #[validate(length(max = FEEDBACK_MAX_LEN))]
    pub feedback: String,
    pub submitted: bool,
    pub dark_mode: bool,
}

impl WidgetValues {
    /// State of every widget on the first render of a session
    pub fn defaults(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            framework: FRAMEWORKS[DEFAULT_FRAMEWORK_INDEX].to_string(),
            slider: DEFAULT_SLIDER,
            agree: DEFAULT_AGREE,
            role: ROLES[DEFAULT_ROLE_INDEX].to_string(),
            birthday: today,
            quantity: DEFAULT_QUANTITY,
            color: DEFAULT_COLOR.to_string(),
            feedback: String::new(),
            submitted: false,
            dark_mode: false,
        }
    }

    /// Build values from raw fields.
    ///
    /// `submitted_form` tells whether the fields came from a posted page form;
    /// browsers omit unchecked checkboxes, so a missing boolean then reads as
    /// `false` instead of the default.
    pub fn from_form(form: &WidgetForm, submitted_form: bool, today: NaiveDate) -> Result<Self> {
        let defaults = Self::defaults(today);

        let values = Self {
            name: form.name.clone().unwrap_or(defaults.name),
            framework: form.framework.clone().unwrap_or(defaults.framework),
            slider: parse_integer("slider", form.slider.as_deref(), defaults.slider)?,
            agree: parse_toggle("agree", form.agree.as_deref(), submitted_form, defaults.agree)?,
            role: form.role.clone().unwrap_or(defaults.role),
            birthday: parse_date("birthday", form.birthday.as_deref(), defaults.birthday)?,
            quantity: parse_integer("quantity", form.quantity.as_deref(), defaults.quantity)?,
            color: form.color.clone().unwrap_or(defaults.color),
            feedback: form.feedback.clone().unwrap_or(defaults.feedback),
            submitted: form
                .submit
                .as_deref()
                .map(|value| !value.trim().is_empty())
                .unwrap_or(false),
            dark_mode: parse_toggle(
                "dark_mode",
                form.dark_mode.as_deref(),
                submitted_form,
                defaults.dark_mode,
            )?,
        };

        values.check(today)?;
        Ok(values)
    }

    /// Enforce every bound the widget declarations carry
    pub fn check(&self, today: NaiveDate) -> Result<()> {
        self.validate()?;

        if !FRAMEWORKS.contains(&self.framework.as_str()) {
            return Err(AppError::ValidationError(format!(
                "framework '{}' is not one of: {}",
                self.framework,
                FRAMEWORKS.join(", ")
            )));
        }

        if !ROLES.contains(&self.role.as_str()) {
            return Err(AppError::ValidationError(format!(
                "role '{}' is not one of: {}",
                self.role,
                ROLES.join(", ")
            )));
        }

        if self.birthday < min_date() || self.birthday > today {
            return Err(AppError::ValidationError(format!(
                "birthday {} must be between {} and {}",
                self.birthday,
                min_date(),
                today
            )));
        }

        if !is_hex_color(&self.color) {
            return Err(AppError::ValidationError(format!(
                "color '{}' is not a #RRGGBB value",
                self.color
            )));
        }

        Ok(())
    }
}

fn parse_integer(field: &str, raw: Option<&str>, default: i64) -> Result<i64> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse::<i64>().map_err(|_| {
            AppError::ValidationError(format!("{} must be a whole number, got '{}'", field, value))
        }),
    }
}

fn parse_toggle(field: &str, raw: Option<&str>, submitted_form: bool, default: bool) -> Result<bool> {
    let Some(value) = raw else {
        return Ok(if submitted_form { false } else { default });
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Ok(true),
        "off" | "false" | "0" | "no" | "" => Ok(false),
        other => Err(AppError::ValidationError(format!(
            "{} must be a boolean, got '{}'",
            field, other
        ))),
    }
}

fn parse_date(field: &str, raw: Option<&str>, default: NaiveDate) -> Result<NaiveDate> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
            AppError::ValidationError(format!("{} must be a YYYY-MM-DD date, got '{}'", field, value))
        }),
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_defaults_match_widget_declarations() {
        let values = WidgetValues::defaults(today());

        assert_eq!(values.framework, "Streamlit");
        assert_eq!(values.slider, 25);
        assert!(values.agree);
        assert_eq!(values.role, "Engineer");
        assert_eq!(values.birthday, today());
        assert_eq!(values.quantity, 3);
        assert_eq!(values.color, "#FF4B4B");
        assert!(!values.submitted);
        assert!(!values.dark_mode);
        assert!(values.check(today()).is_ok());
    }

    #[test]
    fn test_empty_form_on_first_render_uses_defaults() {
        let values = WidgetValues::from_form(&WidgetForm::default(), false, today()).unwrap();
        assert_eq!(values, WidgetValues::defaults(today()));
    }

    #[test]
    fn test_missing_checkbox_on_submitted_form_is_unchecked() {
        let values = WidgetValues::from_form(&WidgetForm::default(), true, today()).unwrap();
        assert!(!values.agree);
        assert!(!values.dark_mode);
    }

    #[test]
    fn test_form_values_are_kept_verbatim() {
        let form = WidgetForm {
            name: Some("Ada".to_string()),
            framework: Some("Gradio".to_string()),
            slider: Some("37".to_string()),
            agree: Some("on".to_string()),
            role: Some("Analyst".to_string()),
            birthday: Some("2010-03-04".to_string()),
            quantity: Some("10".to_string()),
            color: Some("#00FF00".to_string()),
            feedback: Some("A dashboard".to_string()),
            submit: Some("Send feedback".to_string()),
            dark_mode: Some("on".to_string()),
        };

        let values = WidgetValues::from_form(&form, true, today()).unwrap();

        assert_eq!(values.name, "Ada");
        assert_eq!(values.framework, "Gradio");
        assert_eq!(values.slider, 37);
        assert!(values.agree);
        assert_eq!(values.role, "Analyst");
        assert_eq!(values.birthday, NaiveDate::from_ymd_opt(2010, 3, 4).unwrap());
        assert_eq!(values.quantity, 10);
        assert_eq!(values.color, "#00FF00");
        assert_eq!(values.feedback, "A dashboard");
        assert!(values.submitted);
        assert!(values.dark_mode);
    }

    #[test]
    fn test_slider_out_of_range_rejected() {
        let form = WidgetForm {
            slider: Some("101".to_string()),
            ..WidgetForm::default()
        };
        let err = WidgetValues::from_form(&form, false, today()).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_text_length_limits() {
        let at_limit = WidgetForm {
            name: Some("n".repeat(NAME_MAX_LEN as usize)),
            feedback: Some("f".repeat(FEEDBACK_MAX_LEN as usize)),
            ..WidgetForm::default()
        };
        assert!(WidgetValues::from_form(&at_limit, false, today()).is_ok());

        let long_name = WidgetForm {
            name: Some("n".repeat(NAME_MAX_LEN as usize + 1)),
            ..WidgetForm::default()
        };
        let err = WidgetValues::from_form(&long_name, false, today()).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let long_feedback = WidgetForm {
            feedback: Some("f".repeat(FEEDBACK_MAX_LEN as usize + 1)),
            ..WidgetForm::default()
        };
        let err = WidgetValues::from_form(&long_feedback, false, today()).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_quantity_bounds() {
        for (raw, ok) in [("0", false), ("1", true), ("10", true), ("11", false), ("2.5", false)] {
            let form = WidgetForm {
                quantity: Some(raw.to_string()),
                ..WidgetForm::default()
            };
            assert_eq!(
                WidgetValues::from_form(&form, false, today()).is_ok(),
                ok,
                "quantity {}",
                raw
            );
        }
    }

    #[test]
    fn test_date_bounds() {
        let too_early = WidgetForm {
            birthday: Some("1999-12-31".to_string()),
            ..WidgetForm::default()
        };
        assert!(WidgetValues::from_form(&too_early, false, today()).is_err());

        let future = WidgetForm {
            birthday: Some("2024-06-16".to_string()),
            ..WidgetForm::default()
        };
        assert!(WidgetValues::from_form(&future, false, today()).is_err());

        let first_day = WidgetForm {
            birthday: Some("2000-01-01".to_string()),
            ..WidgetForm::default()
        };
        assert!(WidgetValues::from_form(&first_day, false, today()).is_ok());
    }

    #[test]
    fn test_unknown_options_rejected() {
        let form = WidgetForm {
            framework: Some("Shiny".to_string()),
            ..WidgetForm::default()
        };
        assert!(WidgetValues::from_form(&form, false, today()).is_err());

        let form = WidgetForm {
            role: Some("Manager".to_string()),
            ..WidgetForm::default()
        };
        assert!(WidgetValues::from_form(&form, false, today()).is_err());
    }

    #[test]
    fn test_color_must_be_hex() {
        for bad in ["red", "#GGGGGG", "#FFF", "FF4B4B0"] {
            let form = WidgetForm {
                color: Some(bad.to_string()),
                ..WidgetForm::default()
            };
            assert!(WidgetValues::from_form(&form, false, today()).is_err(), "{}", bad);
        }

        let form = WidgetForm {
            color: Some("#00ff00".to_string()),
            ..WidgetForm::default()
        };
        assert_eq!(
            WidgetValues::from_form(&form, false, today()).unwrap().color,
            "#00ff00"
        );
    }

    #[test]
    fn test_blank_submit_does_not_count() {
        let form = WidgetForm {
            submit: Some("  ".to_string()),
            ..WidgetForm::default()
        };
        assert!(!WidgetValues::from_form(&form, true, today()).unwrap().submitted);
    }
}
