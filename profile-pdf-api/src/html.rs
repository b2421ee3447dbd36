//! Server-rendered pages for the form and the preview.

use profile_pdf::navigation::encode_query;
use profile_pdf::render::display_value;
use profile_pdf::{Field, FormView, Notice, PreviewView};
use std::fmt::Write;

const STYLE: &str = "body{font-family:sans-serif;max-width:28rem;margin:3rem auto}\
label{display:block;font-weight:600;margin-top:1rem}\
input,textarea{width:100%;padding:.4rem}\
.error{color:#dc2626;margin:.25rem 0 0}\
.row{display:flex;justify-content:space-between;gap:1rem;margin:.5rem 0}\
[role=alert]{background:#fee2e2;padding:.75rem;border-radius:.25rem}";

/// Escapes text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn placeholder(field: Field) -> &'static str {
    match field {
        Field::Name => "e.g. John Doe",
        Field::Email => "e.g. Johndoe@gmail.com",
        Field::Phone => "e.g. (220) 222 -20002",
        Field::Position => "e.g. Junior Front end Developer",
        Field::Description => "e.g. Work experiences",
    }
}

fn form_label(field: Field) -> &'static str {
    match field {
        Field::Phone => "Phone Number",
        other => other.label(),
    }
}

fn input_type(field: Field) -> &'static str {
    match field {
        Field::Email => "email",
        Field::Phone => "tel",
        _ => "text",
    }
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{}</title><style>{STYLE}</style></head>\n<body>\n{body}</body></html>\n",
        escape(title)
    )
}

fn notice_block(notice: Option<&Notice>) -> String {
    notice
        .map(|n| format!("<div role=\"alert\">{}</div>\n", escape(&n.message)))
        .unwrap_or_default()
}

/// The editable form with any inline validation errors.
pub fn form_page(form: &FormView, notice: Option<&Notice>) -> String {
    let mut body = String::new();
    body.push_str("<h1>Add Your details</h1>\n");
    body.push_str(&notice_block(notice));
    body.push_str("<form method=\"post\" action=\"/\">\n");

    for field in Field::ALL {
        let name = field.as_str();
        let value = escape(form.record().get(field));
        let _ = writeln!(
            body,
            "<label for=\"{name}\">{}</label>",
            form_label(field)
        );
        if field == Field::Description {
            let _ = writeln!(
                body,
                "<textarea id=\"{name}\" name=\"{name}\" rows=\"3\" placeholder=\"{}\">{value}</textarea>",
                escape(placeholder(field))
            );
        } else {
            let _ = writeln!(
                body,
                "<input type=\"{}\" id=\"{name}\" name=\"{name}\" value=\"{value}\" placeholder=\"{}\">",
                input_type(field),
                escape(placeholder(field))
            );
        }
        if let Some(error) = form.errors().get(field) {
            let _ = writeln!(
                body,
                "<p class=\"error\" id=\"{name}-error\">{}</p>",
                escape(error)
            );
        }
    }

    let disabled = if form.is_submitting() { " disabled" } else { "" };
    let download_text = if form.is_submitting() {
        "Generating..."
    } else {
        "Download PDF"
    };
    let _ = writeln!(
        body,
        "<p><button type=\"submit\" name=\"action\" value=\"view\">View PDF</button>\n\
         <button type=\"submit\" name=\"action\" value=\"download\"{disabled}>{download_text}</button></p>"
    );
    body.push_str("</form>\n");

    page("Add Your details", &body)
}

/// The read-only summary with back and download links.
pub fn preview_page(view: &PreviewView, notice: Option<&Notice>) -> String {
    let Some(record) = view.record() else {
        return page("Preview", "<p>Loading preview...</p>\n");
    };
    let query = escape(&encode_query(record));

    let mut body = String::new();
    let _ = writeln!(body, "<a href=\"/preview/back?{query}\">&larr; Back</a>");
    body.push_str(&notice_block(notice));
    body.push_str("<section>\n");
    for field in Field::ALL {
        let _ = writeln!(
            body,
            "<div class=\"row\"><strong>{}:</strong><span>{}</span></div>",
            form_label(field),
            escape(display_value(record, field))
        );
    }
    body.push_str("</section>\n");

    if view.is_submitting() {
        body.push_str("<p><button disabled>Generating...</button></p>\n");
    } else {
        let _ = writeln!(
            body,
            "<p><a href=\"/preview/download?{query}\" download>Download PDF</a></p>"
        );
    }

    page("Preview", &body)
}
