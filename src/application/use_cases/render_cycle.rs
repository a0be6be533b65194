//! One top-to-bottom evaluation of the showcase page.
//!
//! Every request runs the whole page again from that request's widget
//! values; the cycle keeps no state between runs.

use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

use crate::application::use_cases::csv_preview::CsvPreview;
use crate::domain::csv::{UploadedFile, ACCEPTED_EXTENSIONS};
use crate::domain::error::Result;
use crate::domain::frame::{Control, Element, Frame};
use crate::domain::widgets::{self, labels, WidgetValues};

pub const PAGE_TITLE: &str = "Streamlit Components 101";

pub const INTRO: &str = "This app showcases 10 foundational Streamlit components you can \
recombine to build data apps quickly. Interact with each widget to see how values flow \
through the app. Most components mirror common HTML form elements, but Streamlit wires \
them directly into Python variables.";

pub const SIDEBAR_HEADER: &str = "Toggle UI Themes";
pub const SIDEBAR_CAPTION: &str = "Use the toggle to emulate a settings switch. Streamlit \
supports custom theming through configuration files; here we just show state handling.";

pub const NAME_PROMPT: &str = "Enter a name to see a greeting.";
pub const NO_FILE_CAPTION: &str = "No file uploaded yet. Try a small CSV to see the preview.";
pub const FEEDBACK_THANKS: &str =
    "Thanks for your ideas! Streamlit thrives on community projects.";
pub const TIP_CAPTION: &str = "Tip: Each widget writes its return value to a Python variable. \
Combine them with the layout primitives in Streamlit (columns, tabs, expanders) to build rich \
interactive tools without writing JavaScript.";
pub const DARK_MODE_CAPTION: &str =
    "(Imagine a dark theme here — try the toggle in the sidebar!)";

pub const FEEDBACK_FORM_KEY: &str = "feedback_form";

/// Evaluates the page for one request
#[derive(Debug, Clone, Default)]
pub struct RenderCycle {
    preview: CsvPreview,
}

impl RenderCycle {
    pub fn new(preview: CsvPreview) -> Self {
        Self { preview }
    }

    /// Build the frame for `values` and an optional upload.
    ///
    /// A CSV `ParseError` aborts the cycle and is returned unchanged.
    pub fn run(
        &self,
        values: &WidgetValues,
        upload: Option<&UploadedFile>,
        today: NaiveDate,
    ) -> Result<Frame> {
        let cycle_id = Uuid::new_v4();
        debug!(%cycle_id, has_upload = upload.is_some(), "Render cycle started");

        let mut frame = Frame::new();
        frame.dark_mode = values.dark_mode;

        frame.push(Element::Title(PAGE_TITLE.to_string()));
        frame.push(Element::Text(INTRO.to_string()));

        self.sidebar(&mut frame, values);
        self.text_input(&mut frame, values);
        self.select_box(&mut frame, values);
        self.slider(&mut frame, values);
        self.checkbox(&mut frame, values);
        self.radio(&mut frame, values);
        self.date_input(&mut frame, values, today);
        self.file_uploader(&mut frame, upload, cycle_id)?;
        self.number_input(&mut frame, values);
        self.color_picker(&mut frame, values);
        self.feedback_form(&mut frame, values);

        frame.push(Element::Divider);
        frame.push(Element::Caption(TIP_CAPTION.to_string()));

        if values.dark_mode {
            frame.push(Element::Caption(DARK_MODE_CAPTION.to_string()));
        }

        debug!(%cycle_id, elements = frame.main.len(), "Render cycle finished");
        Ok(frame)
    }

    fn sidebar(&self, frame: &mut Frame, values: &WidgetValues) {
        frame.push_sidebar(Element::Header(SIDEBAR_HEADER.to_string()));
        frame.push_sidebar(Element::Widget(Control::Toggle {
            key: "dark_mode".to_string(),
            label: labels::DARK_MODE.to_string(),
            on: values.dark_mode,
        }));
        frame.push_sidebar(Element::Caption(SIDEBAR_CAPTION.to_string()));
    }

    fn text_input(&self, frame: &mut Frame, values: &WidgetValues) {
        frame.push(Element::Subheader("1. Text input".to_string()));
        frame.push(Element::Widget(Control::TextInput {
            key: "name".to_string(),
            label: labels::NAME.to_string(),
            value: values.name.clone(),
            placeholder: widgets::NAME_PLACEHOLDER.to_string(),
            max_len: widgets::NAME_MAX_LEN,
        }));

        if values.name.is_empty() {
            frame.push(Element::Info(NAME_PROMPT.to_string()));
        } else {
            frame.push(Element::Success(format!("Hello, {}! 👋", values.name)));
        }
    }

    fn select_box(&self, frame: &mut Frame, values: &WidgetValues) {
        frame.push(Element::Subheader("2. Select box".to_string()));
        frame.push(Element::Widget(Control::SelectBox {
            key: "framework".to_string(),
            label: labels::FRAMEWORK.to_string(),
            options: owned(widgets::FRAMEWORKS),
            selected: values.framework.clone(),
        }));
        frame.push(Element::Text(format!("You selected: {}", values.framework)));
    }

    fn slider(&self, frame: &mut Frame, values: &WidgetValues) {
        frame.push(Element::Subheader("3. Slider".to_string()));
        frame.push(Element::Widget(Control::Slider {
            key: "slider".to_string(),
            label: labels::SLIDER.to_string(),
            min: widgets::SLIDER_MIN,
            max: widgets::SLIDER_MAX,
            value: values.slider,
        }));
        frame.push(Element::Text(format!("Slider value: {}", values.slider)));
    }

    fn checkbox(&self, frame: &mut Frame, values: &WidgetValues) {
        frame.push(Element::Subheader("4. Checkbox".to_string()));
        frame.push(Element::Widget(Control::Checkbox {
            key: "agree".to_string(),
            label: labels::AGREE.to_string(),
            checked: values.agree,
        }));
        frame.push(Element::Text(format!(
            "Checkbox state: {}",
            if values.agree { "True" } else { "False" }
        )));
    }

    fn radio(&self, frame: &mut Frame, values: &WidgetValues) {
        frame.push(Element::Subheader("5. Radio buttons".to_string()));
        frame.push(Element::Widget(Control::Radio {
            key: "role".to_string(),
            label: labels::ROLE.to_string(),
            options: owned(widgets::ROLES),
            selected: values.role.clone(),
        }));
        frame.push(Element::Text(format!("Role chosen: {}", values.role)));
    }

    fn date_input(&self, frame: &mut Frame, values: &WidgetValues, today: NaiveDate) {
        frame.push(Element::Subheader("6. Date input".to_string()));
        frame.push(Element::Widget(Control::DateInput {
            key: "birthday".to_string(),
            label: labels::BIRTHDAY.to_string(),
            value: values.birthday,
            min: widgets::min_date(),
            max: today,
        }));
        frame.push(Element::Text(format!("Selected date: {}", values.birthday)));
    }

    fn file_uploader(
        &self,
        frame: &mut Frame,
        upload: Option<&UploadedFile>,
        cycle_id: Uuid,
    ) -> Result<()> {
        frame.push(Element::Subheader("7. File uploader".to_string()));
        frame.push(Element::Widget(Control::FileUploader {
            key: "file".to_string(),
            label: labels::FILE.to_string(),
            accept: ACCEPTED_EXTENSIONS
                .iter()
                .map(|ext| format!(".{}", ext))
                .collect(),
        }));

        match upload {
            Some(file) => {
                let preview = self.preview.preview_upload(file)?;
                info!(
                    %cycle_id,
                    file = %file.file_name,
                    rows = preview.total_rows,
                    columns = preview.columns.len(),
                    "CSV preview built"
                );
                frame.push(Element::DataFrame(preview));
            }
            None => frame.push(Element::Caption(NO_FILE_CAPTION.to_string())),
        }

        Ok(())
    }

    fn number_input(&self, frame: &mut Frame, values: &WidgetValues) {
        frame.push(Element::Subheader("8. Number input".to_string()));
        frame.push(Element::Widget(Control::NumberInput {
            key: "quantity".to_string(),
            label: labels::QUANTITY.to_string(),
            min: widgets::QUANTITY_MIN,
            max: widgets::QUANTITY_MAX,
            step: widgets::QUANTITY_STEP,
            value: values.quantity,
        }));
        frame.push(Element::Text(format!(
            "We'll process {} samples.",
            values.quantity
        )));
    }

    fn color_picker(&self, frame: &mut Frame, values: &WidgetValues) {
        frame.push(Element::Subheader("9. Color picker".to_string()));
        frame.push(Element::Widget(Control::ColorPicker {
            key: "color".to_string(),
            label: labels::COLOR.to_string(),
            value: values.color.clone(),
        }));
        frame.push(Element::Text(format!("You picked: {}", values.color)));
    }

    fn feedback_form(&self, frame: &mut Frame, values: &WidgetValues) {
        frame.push(Element::Subheader("10. Form submission".to_string()));
        frame.push(Element::Form {
            key: FEEDBACK_FORM_KEY.to_string(),
            controls: vec![
                Control::TextArea {
                    key: "feedback".to_string(),
                    label: labels::FEEDBACK.to_string(),
                    value: values.feedback.clone(),
                    rows: widgets::FEEDBACK_ROWS,
                    max_len: widgets::FEEDBACK_MAX_LEN,
                },
                Control::SubmitButton {
                    key: "submit".to_string(),
                    label: labels::SUBMIT.to_string(),
                },
            ],
        });

        if values.submitted {
            frame.push(Element::Success(FEEDBACK_THANKS.to_string()));
            frame.push(Element::Text(format!("Your idea: {}", values.feedback)));
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
