//! Display output of one render cycle.
//!
//! A frame is the ordered list of everything the page shows: widget
//! controls with their current state, echo text, callouts and tables.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::csv::Preview;

/// An input control and the value it currently holds.
///
/// `key` is the form field name the control submits under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Control {
    TextInput {
        key: String,
        label: String,
        value: String,
        placeholder: String,
        max_len: u64,
    },
    SelectBox {
        key: String,
        label: String,
        options: Vec<String>,
        selected: String,
    },
    Slider {
        key: String,
        label: String,
        min: i64,
        max: i64,
        value: i64,
    },
    Checkbox {
        key: String,
        label: String,
        checked: bool,
    },
    Toggle {
        key: String,
        label: String,
        on: bool,
    },
    Radio {
        key: String,
        label: String,
        options: Vec<String>,
        selected: String,
    },
    DateInput {
        key: String,
        label: String,
        value: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },
    FileUploader {
        key: String,
        label: String,
        accept: Vec<String>,
    },
    NumberInput {
        key: String,
        label: String,
        min: i64,
        max: i64,
        step: i64,
        value: i64,
    },
    ColorPicker {
        key: String,
        label: String,
        value: String,
    },
    TextArea {
        key: String,
        label: String,
        value: String,
        rows: u32,
        max_len: u64,
    },
    SubmitButton {
        key: String,
        label: String,
    },
}

impl Control {
    pub fn key(&self) -> &str {
        match self {
            Control::TextInput { key, .. }
            | Control::SelectBox { key, .. }
            | Control::Slider { key, .. }
            | Control::Checkbox { key, .. }
            | Control::Toggle { key, .. }
            | Control::Radio { key, .. }
            | Control::DateInput { key, .. }
            | Control::FileUploader { key, .. }
            | Control::NumberInput { key, .. }
            | Control::ColorPicker { key, .. }
            | Control::TextArea { key, .. }
            | Control::SubmitButton { key, .. } => key,
        }
    }
}

/// A single displayed block, in the order the page emits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum Element {
    Title(String),
    Header(String),
    Subheader(String),
    Text(String),
    Success(String),
    Info(String),
    Caption(String),
    Widget(Control),
    Form { key: String, controls: Vec<Control> },
    DataFrame(Preview),
    Divider,
}

/// Everything one render cycle produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub sidebar: Vec<Element>,
    pub main: Vec<Element>,
    pub dark_mode: bool,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: Element) {
        self.main.push(element);
    }

    pub fn push_sidebar(&mut self, element: Element) {
        self.sidebar.push(element);
    }

    /// Plain-text lines of the main area, skipping controls, tables and dividers
    pub fn texts(&self) -> Vec<&str> {
        self.main
            .iter()
            .filter_map(|element| match element {
                Element::Title(text)
                | Element::Header(text)
                | Element::Subheader(text)
                | Element::Text(text)
                | Element::Success(text)
                | Element::Info(text)
                | Element::Caption(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|text| *text == needle)
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.main.iter().find_map(|element| match element {
            Element::DataFrame(preview) => Some(preview),
            _ => None,
        })
    }

    /// Every control on the page, sidebar first, forms flattened
    pub fn controls(&self) -> Vec<&Control> {
        self.sidebar
            .iter()
            .chain(self.main.iter())
            .flat_map(|element| match element {
                Element::Widget(control) => vec![control],
                Element::Form { controls, .. } => controls.iter().collect(),
                _ => Vec::new(),
            })
            .collect()
    }
}
