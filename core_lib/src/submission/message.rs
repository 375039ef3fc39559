//! Rendering a lead as an email notification

use crate::config::MailConfig;
use crate::models::{LeadField, LeadRecord};
use crate::notify::NotificationMessage;
use std::fmt::Write;

pub const UNKNOWN_NAME: &str = "Unknown";

const HEADING: &str = "New Lead Submitted";

pub fn build_message(lead: &LeadRecord, mail: &MailConfig) -> NotificationMessage {
    let name = lead.name.trim();
    let subject = format!(
        "{} - {}",
        mail.subject_prefix,
        if name.is_empty() { UNKNOWN_NAME } else { name }
    );

    let email = lead.email.trim();
    let reply_to = (!email.is_empty()).then(|| email.to_string());

    NotificationMessage {
        from: mail.from.clone(),
        to: mail.to.clone(),
        subject,
        reply_to,
        html: render_html(lead),
        text: render_text(lead),
    }
}

fn render_html(lead: &LeadRecord) -> String {
    let mut html = format!("<h2>{}</h2>\n", HEADING);
    for field in LeadField::ALL {
        let _ = writeln!(
            html,
            "<p><b>{}:</b> {}</p>",
            field.label(),
            escape_html(lead.get(field))
        );
    }
    html
}

fn render_text(lead: &LeadRecord) -> String {
    let mut text = format!("{}\n\n", HEADING);
    for field in LeadField::ALL {
        let _ = writeln!(text, "{}: {}", field.label(), lead.get(field));
    }
    text
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
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
