//! HTML rendering of the prescription page.
//!
//! The page is a fixed template: a title bar, a heading naming the patient,
//! the completion inside a `contenteditable` region and a small script that
//! saves the edited region as `Prescription_<name>.html`.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// How the completion text is placed into the editable region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionMarkup {
    /// Inserted verbatim; any markup in the completion is live HTML.
    #[default]
    Raw,
    /// HTML special characters are escaped, so the text shows as typed.
    Escaped,
}

const HOSPITAL_NAME: &str = "RIIMS Hospital";

const HEAD_OPEN: &str = "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Prescription for ";

const STYLE: &str = r#"</title>
<link href="https://fonts.googleapis.com/css2?family=Roboto&display=swap" rel="stylesheet">
<style>
  body {
    font-family: 'Roboto', sans-serif;
    background: url('hospital.png') no-repeat center center fixed;
    background-size: cover;
    margin: 0;
    padding: 0;
  }
  .overlay {
    background-color: rgba(255, 255, 255, 0.88);
    min-height: 100vh;
    padding: 2rem 1rem;
    display: flex;
    justify-content: center;
    align-items: flex-start;
  }
  .container {
    max-width: 850px;
    background: #ffffff;
    padding: 2rem;
    border-radius: 16px;
    box-shadow: 0 10px 25px rgba(0, 0, 0, 0.1);
  }
  h1 {
    color: #e60044;
    text-align: center;
    font-size: 2.2rem;
    font-weight: bold;
    text-decoration: underline;
    margin-bottom: 1rem;
  }
  h2 {
    color: #003366;
    font-size: 1.8rem;
    margin-bottom: 1rem;
    text-align: center;
  }
  .issued {
    text-align: center;
    color: #555;
    margin-bottom: 1.5rem;
  }
  .prescription-text {
    font-size: 1.05rem;
    color: #222;
    line-height: 1.7;
    white-space: pre-wrap;
    border: 1px solid #ccc;
    border-radius: 8px;
    padding: 1rem;
    background: #f9f9f9;
    margin-bottom: 1.5rem;
  }
  .prescription-text[contenteditable="true"]:focus {
    outline: 2px dashed #007bff;
    background: #fff;
  }
  .btn-group {
    text-align: center;
    margin-top: 1.5rem;
  }
  .btn {
    background-color: #007bff;
    color: white;
    padding: 0.7rem 1.4rem;
    border: none;
    border-radius: 8px;
    font-size: 1rem;
    margin: 0 0.5rem;
    transition: background 0.3s ease;
    text-decoration: none;
    cursor: pointer;
  }
  .btn:hover {
    background-color: #0056b3;
  }
</style>
</head>
<body>
<div class="overlay">
<div class="container">
"#;

const CONTENT_OPEN: &str = "<div class=\"prescription-text\" contenteditable=\"true\">";

const CONTENT_CLOSE: &str = r#"</div>
<div class="btn-group">
  <a href="/" class="btn">Edit Info</a>
  <button onclick="savePrescription()" class="btn">Save Changes</button>
</div>
</div>
</div>
<script>
  function savePrescription() {
    const content = document.querySelector('.prescription-text').innerHTML;
    const blob = new Blob(["<html><body>" + content + "</body></html>"], { type: 'text/html' });
    const link = document.createElement('a');
    link.href = URL.createObjectURL(blob);
    link.download = '"#;

const SCRIPT_CLOSE: &str = r#"';
    document.body.appendChild(link);
    link.click();
    document.body.removeChild(link);
  }
</script>
</body>
</html>
"#;

/// Render the prescription page issued today.
pub fn render_prescription(name: &str, completion: &str, markup: CompletionMarkup) -> String {
    render_prescription_on(name, completion, markup, Local::now().date_naive())
}

/// Render the prescription page with an explicit issue date.
pub fn render_prescription_on(
    name: &str,
    completion: &str,
    markup: CompletionMarkup,
    issued: NaiveDate,
) -> String {
    let name_html = escape_html(name);
    let body = match markup {
        CompletionMarkup::Raw => completion.to_string(),
        CompletionMarkup::Escaped => escape_html(completion),
    };

    let mut page = String::with_capacity(STYLE.len() + CONTENT_CLOSE.len() + body.len() + 512);
    page.push_str(HEAD_OPEN);
    page.push_str(&name_html);
    page.push_str(STYLE);
    page.push_str("<h1>");
    page.push_str(HOSPITAL_NAME);
    page.push_str("</h1>\n<h2>Prescription for ");
    page.push_str(&name_html);
    page.push_str("</h2>\n<p class=\"issued\">Issued ");
    page.push_str(&issued.format("%B %-d, %Y").to_string());
    page.push_str("</p>\n");
    page.push_str(CONTENT_OPEN);
    page.push_str(&body);
    page.push_str(CONTENT_CLOSE);
    page.push_str(&download_file_name(name));
    page.push_str(SCRIPT_CLOSE);
    page
}

/// File name offered by the save script, e.g. `Prescription_Jane Doe.html`.
///
/// Only letters, digits, spaces, `-`, `_` and `.` survive so the result can
/// sit inside a single-quoted script string.
pub fn download_file_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.'))
        .collect();
    let stem = if cleaned.trim_matches(|c| c == '.' || c == ' ').is_empty() {
        "patient"
    } else {
        cleaned.as_str()
    };
    format!("Prescription_{stem}.html")
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
