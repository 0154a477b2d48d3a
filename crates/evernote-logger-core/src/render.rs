use crate::group::NotebookGroup;
use crate::utils::escape_html;
use crate::window::DayWindow;

const ENML_PREAMBLE: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    r#"<!DOCTYPE en-note SYSTEM "http://xml.evernote.com/pub/enml2.dtd">"#,
    "<en-note>"
);
const ENML_CLOSE: &str = "</en-note>";

/// The daily log body, ready to render as ENML.
pub struct LogDocument<'a> {
    pub window: &'a DayWindow,
    pub day_label: &'a str,
    /// Emitted as-is, they may carry markup
    pub headlines: &'a [String],
    pub groups: &'a [NotebookGroup],
    /// `YYYY/MM/DD HH:MM` instead of `HH:MM`
    pub full_timestamp: bool,
}

impl LogDocument<'_> {
    pub fn render(&self) -> String {
        let mut out = String::from(ENML_PREAMBLE);
        out.push_str(&format!(
            "<h1>{} {}</h1>",
            self.window.short_label(),
            self.day_label
        ));

        for headline in self.headlines {
            out.push_str(&format!("<h1>{}</h1>", headline));
        }

        for group in self.groups {
            if !group.name.is_empty() {
                out.push_str(&format!("<h2>{}</h2>", escape_html(&group.name)));
            }
            for note in &group.notes {
                let stamp = if self.full_timestamp {
                    note.stamp.as_str()
                } else {
                    note.time_of_day()
                };
                out.push_str(&format!(
                    "<div>{}&nbsp;&nbsp;<a href=\"{}\">{}</a> {}</div>",
                    stamp,
                    note.view_link,
                    escape_html(&note.title),
                    note.kind.marker()
                ));
            }
        }

        out.push_str(ENML_CLOSE);
        out
    }
}

/// Title of the published note
pub fn publish_title(window: &DayWindow) -> String {
    format!("Auto - Log - {}", window.short_label())
}
