//! Server-side HTML for a rendered frame.
//!
//! The whole page is one multipart form posting back to `/`, so every
//! interaction reruns the page with the browser's current widget values.

use std::fmt::Write;

use crate::domain::csv::Preview;
use crate::domain::error::AppError;
use crate::domain::frame::{Control, Element, Frame};

const STYLE: &str = r#"
body { font-family: "Source Sans Pro", sans-serif; margin: 0; display: flex; color: #31333f; background: #ffffff; }
body.dark { color: #fafafa; background: #0e1117; }
aside { width: 18rem; padding: 2rem 1rem; background: #f0f2f6; min-height: 100vh; }
body.dark aside { background: #262730; }
main { max-width: 46rem; padding: 2rem 3rem; flex: 1; }
.success { background: #dff5e3; color: #14532d; padding: .75rem 1rem; border-radius: .5rem; }
.info { background: #e0ecff; color: #1e3a8a; padding: .75rem 1rem; border-radius: .5rem; }
.error { background: #fde2e1; color: #7f1d1d; padding: .75rem 1rem; border-radius: .5rem; }
.caption { font-size: .85rem; opacity: .7; }
.widget { display: block; margin: .5rem 0; }
fieldset.form { border: 1px solid #d6d6d9; border-radius: .5rem; padding: 1rem; }
table.dataframe { border-collapse: collapse; font-size: .9rem; }
table.dataframe th, table.dataframe td { border: 1px solid #e6e9ef; padding: .25rem .5rem; text-align: left; }
.rerun { position: sticky; top: 0; }
"#;

/// Render a full HTML document for `frame`
pub fn render_page(frame: &Frame) -> String {
    let title = frame
        .main
        .iter()
        .find_map(|element| match element {
            Element::Title(text) => Some(text.as_str()),
            _ => None,
        })
        .unwrap_or("Widget Showcase");

    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n",
        escape_html(title),
        STYLE
    );
    let _ = write!(
        html,
        "<body{}>\n<form method=\"post\" action=\"/\" enctype=\"multipart/form-data\" style=\"display:contents\">\n",
        if frame.dark_mode { " class=\"dark\"" } else { "" }
    );

    html.push_str("<aside>\n");
    for element in &frame.sidebar {
        render_element(&mut html, element);
    }
    html.push_str("<button type=\"submit\" name=\"rerun\" value=\"1\" class=\"rerun\">Rerun</button>\n");
    html.push_str("</aside>\n<main>\n");
    for element in &frame.main {
        render_element(&mut html, element);
    }
    html.push_str("</main>\n</form>\n</body>\n</html>\n");
    html
}

/// Render the page shown when a cycle fails
pub fn render_error_page(err: &AppError) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Error</title>\n<style>{}</style>\n</head>\n<body>\n<main>\n\
         <h1>Something went wrong</h1>\n<div class=\"error\">{}</div>\n\
         <p><a href=\"/\">Back to the app</a></p>\n</main>\n</body>\n</html>\n",
        STYLE,
        escape_html(&err.to_string())
    )
}

fn render_element(html: &mut String, element: &Element) {
    match element {
        Element::Title(text) => {
            let _ = writeln!(html, "<h1>{}</h1>", escape_html(text));
        }
        Element::Header(text) => {
            let _ = writeln!(html, "<h2>{}</h2>", escape_html(text));
        }
        Element::Subheader(text) => {
            let _ = writeln!(html, "<h3>{}</h3>", escape_html(text));
        }
        Element::Text(text) => {
            let _ = writeln!(html, "<p>{}</p>", escape_html(text));
        }
        Element::Success(text) => {
            let _ = writeln!(html, "<div class=\"success\">{}</div>", escape_html(text));
        }
        Element::Info(text) => {
            let _ = writeln!(html, "<div class=\"info\">{}</div>", escape_html(text));
        }
        Element::Caption(text) => {
            let _ = writeln!(html, "<p class=\"caption\">{}</p>", escape_html(text));
        }
        Element::Widget(control) => render_control(html, control),
        Element::Form { key, controls } => {
            let _ = writeln!(html, "<fieldset class=\"form\" id=\"{}\">", escape_html(key));
            for control in controls {
                render_control(html, control);
            }
            html.push_str("</fieldset>\n");
        }
        Element::DataFrame(preview) => render_preview(html, preview),
        Element::Divider => html.push_str("<hr>\n"),
    }
}

fn render_control(html: &mut String, control: &Control) {
    match control {
        Control::TextInput {
            key,
            label,
            value,
            placeholder,
            max_len,
        } => {
            let _ = writeln!(
                html,
                "<label class=\"widget\">{}<br><input type=\"text\" name=\"{}\" value=\"{}\" placeholder=\"{}\" maxlength=\"{}\"></label>",
                escape_html(label),
                escape_html(key),
                escape_html(value),
                escape_html(placeholder),
                max_len
            );
        }
        Control::SelectBox {
            key,
            label,
            options,
            selected,
        } => {
            let _ = write!(
                html,
                "<label class=\"widget\">{}<br><select name=\"{}\">",
                escape_html(label),
                escape_html(key)
            );
            for option in options {
                let _ = write!(
                    html,
                    "<option value=\"{0}\"{1}>{0}</option>",
                    escape_html(option),
                    if option == selected { " selected" } else { "" }
                );
            }
            html.push_str("</select></label>\n");
        }
        Control::Slider {
            key,
            label,
            min,
            max,
            value,
        } => {
            let _ = writeln!(
                html,
                "<label class=\"widget\">{}<br><input type=\"range\" name=\"{}\" min=\"{}\" max=\"{}\" value=\"{}\" \
                 oninput=\"this.nextElementSibling.value=this.value\"><output>{}</output></label>",
                escape_html(label),
                escape_html(key),
                min,
                max,
                value,
                value
            );
        }
        Control::Checkbox {
            key,
            label,
            checked,
        } => render_checkbox(html, key, label, *checked, "checkbox"),
        Control::Toggle { key, label, on } => render_checkbox(html, key, label, *on, "toggle"),
        Control::Radio {
            key,
            label,
            options,
            selected,
        } => {
            let _ = write!(
                html,
                "<fieldset class=\"widget\"><legend>{}</legend>",
                escape_html(label)
            );
            for option in options {
                let _ = write!(
                    html,
                    "<label><input type=\"radio\" name=\"{}\" value=\"{2}\"{}> {2}</label><br>",
                    escape_html(key),
                    if option == selected { " checked" } else { "" },
                    escape_html(option)
                );
            }
            html.push_str("</fieldset>\n");
        }
        Control::DateInput {
            key,
            label,
            value,
            min,
            max,
        } => {
            let _ = writeln!(
                html,
                "<label class=\"widget\">{}<br><input type=\"date\" name=\"{}\" value=\"{}\" min=\"{}\" max=\"{}\"></label>",
                escape_html(label),
                escape_html(key),
                value,
                min,
                max
            );
        }
        Control::FileUploader { key, label, accept } => {
            let _ = writeln!(
                html,
                "<label class=\"widget\">{}<br><input type=\"file\" name=\"{}\" accept=\"{}\"></label>",
                escape_html(label),
                escape_html(key),
                escape_html(&accept.join(","))
            );
        }
        Control::NumberInput {
            key,
            label,
            min,
            max,
            step,
            value,
        } => {
            let _ = writeln!(
                html,
                "<label class=\"widget\">{}<br><input type=\"number\" name=\"{}\" min=\"{}\" max=\"{}\" step=\"{}\" value=\"{}\"></label>",
                escape_html(label),
                escape_html(key),
                min,
                max,
                step,
                value
            );
        }
        Control::ColorPicker { key, label, value } => {
            let _ = writeln!(
                html,
                "<label class=\"widget\">{}<br><input type=\"color\" name=\"{}\" value=\"{}\"></label>",
                escape_html(label),
                escape_html(key),
                escape_html(&value.to_ascii_lowercase())
            );
        }
        Control::TextArea {
            key,
            label,
            value,
            rows,
            max_len,
        } => {
            let _ = writeln!(
                html,
                "<label class=\"widget\">{}<br><textarea name=\"{}\" rows=\"{}\" maxlength=\"{}\">{}</textarea></label>",
                escape_html(label),
                escape_html(key),
                rows,
                max_len,
                escape_html(value)
            );
        }
        Control::SubmitButton { key, label } => {
            let _ = writeln!(
                html,
                "<button type=\"submit\" name=\"{}\" value=\"{1}\">{1}</button>",
                escape_html(key),
                escape_html(label)
            );
        }
    }
}

fn render_checkbox(html: &mut String, key: &str, label: &str, checked: bool, class: &str) {
    let _ = writeln!(
        html,
        "<label class=\"widget {}\"><input type=\"checkbox\" name=\"{}\" value=\"on\"{}> {}</label>",
        class,
        escape_html(key),
        if checked { " checked" } else { "" },
        escape_html(label)
    );
}

fn render_preview(html: &mut String, preview: &Preview) {
    html.push_str("<table class=\"dataframe\">\n<thead><tr><th></th>");
    for column in &preview.columns {
        let _ = write!(html, "<th>{}</th>", escape_html(column));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in &preview.rows {
        let _ = write!(html, "<tr><th>{}</th>", row.index);
        for value in &row.values {
            let _ = write!(html, "<td>{}</td>", escape_html(value));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    let _ = writeln!(
        html,
        "<p class=\"caption\">{}</p>",
        escape_html(&preview.shape_caption())
    );
}

/// Escape text for use in element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
