use actix_multipart::form::bytes::Bytes;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;

use crate::domain::csv::UploadedFile;
use crate::domain::widgets::WidgetForm;

/// Multipart body posted by the page form
#[derive(Debug, MultipartForm)]
pub struct PageForm {
    pub name: Option<Text<String>>,
    pub framework: Option<Text<String>>,
    pub slider: Option<Text<String>>,
    pub agree: Option<Text<String>>,
    pub role: Option<Text<String>>,
    pub birthday: Option<Text<String>>,
    pub quantity: Option<Text<String>>,
    pub color: Option<Text<String>>,
    pub feedback: Option<Text<String>>,
    pub submit: Option<Text<String>>,
    pub dark_mode: Option<Text<String>>,
    pub file: Option<Bytes>,
}

impl PageForm {
    /// Split into widget fields and the upload, if a file was chosen.
    ///
    /// Browsers send an empty, unnamed file part when nothing was picked;
    /// that counts as no upload.
    pub fn into_parts(self) -> (WidgetForm, Option<UploadedFile>) {
        let upload = self.file.and_then(|file| {
            let file_name = file.file_name.unwrap_or_default();
            if file_name.trim().is_empty() {
                None
            } else {
                Some(UploadedFile::new(file_name, file.data.to_vec()))
            }
        });

        let form = WidgetForm {
            name: text(self.name),
            framework: text(self.framework),
            slider: text(self.slider),
            agree: text(self.agree),
            role: text(self.role),
            birthday: text(self.birthday),
            quantity: text(self.quantity),
            color: text(self.color),
            feedback: text(self.feedback),
            submit: text(self.submit),
            dark_mode: text(self.dark_mode),
        };

        (form, upload)
    }
}

fn text(field: Option<Text<String>>) -> Option<String> {
    field.map(Text::into_inner)
}
