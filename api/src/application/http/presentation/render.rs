use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

use super::view::ViewState;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"));

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Render model text as HTML. Only `**bold**` and line breaks are
/// interpreted; everything else, markup included, is shown literally.
pub fn format_analysis(text: &str) -> String {
    let escaped = escape_html(text);
    BOLD.replace_all(&escaped, "<strong>$1</strong>")
        .replace("\r\n", "\n")
        .replace('\n', "<br>")
}

fn hidden(visible: bool) -> &'static str {
    if visible { "" } else { " hidden" }
}

/// Full HTML document for `state`. Every route the page talks to is
/// prefixed with `root_path`.
pub fn render_page(state: &ViewState, root_path: &str) -> String {
    let root = escape_html(root_path);
    let filename = state.filename().map(escape_html).unwrap_or_default();
    let disabled = if state.button_disabled() { " disabled" } else { "" };
    let button_label = if state.is_loading() {
        "Analyzing..."
    } else {
        "Analyze"
    };
    let error = state.error_message().map(escape_html).unwrap_or_default();

    let mut results = String::new();
    if let Some(analysis) = state.analysis() {
        let found = if analysis.found_unhealthy.is_empty() {
            "<p class=\"muted\">None of the listed ingredients were found.</p>".to_string()
        } else {
            let items: String = analysis
                .found_unhealthy
                .as_slice()
                .iter()
                .map(|term| format!("<li>{}</li>", escape_html(term)))
                .collect();
            format!("<ul>{items}</ul>")
        };
        let _ = write!(
            results,
            "<h2>Ingredients</h2><p id=\"ingredients\">{}</p>\
             <h2>Unhealthy ingredients found</h2><div id=\"found\">{}</div>\
             <h2>Health analysis</h2><div id=\"analysis\">{}</div>",
            format_analysis(&analysis.ingredients),
            found,
            format_analysis(&analysis.analysis),
        );
    }

    let mut page = String::with_capacity(STYLE.len() + SCRIPT.len() + 2048);
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"UTF-8\">\n");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    page.push_str("<title>FoodLens</title>\n<style>");
    page.push_str(STYLE);
    page.push_str("</style>\n</head>\n<body>\n<main class=\"container\">\n");
    page.push_str("<h1>FoodLens</h1>\n");
    page.push_str(
        "<p class=\"muted\">Upload a photo of a food package's ingredient list.</p>\n",
    );
    let _ = write!(
        page,
        "<form id=\"upload-form\" action=\"{root}/analyze\" method=\"post\" \
         enctype=\"multipart/form-data\" data-api=\"{root}/api/analyze\">\n\
         <input type=\"file\" id=\"image\" name=\"image\" accept=\"image/*\">\n\
         <p id=\"selected\" class=\"muted\">{filename}</p>\n\
         <button type=\"submit\" id=\"submit\"{disabled}>{button_label}</button>\n\
         </form>\n\
         <div id=\"loading\" class=\"loading\"{}>Analyzing image...</div>\n\
         <div id=\"error\" class=\"error\"{}>{error}</div>\n\
         <section id=\"results\"{}>{results}</section>\n",
        hidden(state.is_loading()),
        hidden(!error.is_empty()),
        hidden(!results.is_empty()),
    );
    page.push_str("</main>\n<script>");
    page.push_str(SCRIPT);
    page.push_str("</script>\n</body>\n</html>\n");
    page
}

const STYLE: &str = r##"
* { box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #f4f6f3; color: #1f2a1f; margin: 0; }
.container { max-width: 720px; margin: 40px auto; background: #fff; border-radius: 12px; padding: 32px; box-shadow: 0 8px 24px rgba(0,0,0,0.08); }
h1 { margin-top: 0; color: #2f6b2f; }
h2 { font-size: 1.1rem; margin-top: 24px; }
.muted { color: #667; }
button { background: #2f6b2f; color: #fff; border: 0; border-radius: 6px; padding: 10px 20px; font-size: 1rem; cursor: pointer; }
button:disabled { background: #9ab59a; cursor: not-allowed; }
.loading { margin-top: 16px; font-style: italic; }
.error { margin-top: 16px; padding: 12px; background: #fdecea; color: #a12622; border-radius: 6px; }
#found ul { padding-left: 20px; }
#found li { color: #a12622; }
"##;

const SCRIPT: &str = r##"
(() => {
  const MAX_EDGE = 800;
  const form = document.getElementById('upload-form');
  const input = document.getElementById('image');
  const button = document.getElementById('submit');
  const selected = document.getElementById('selected');
  const loading = document.getElementById('loading');
  const errorBox = document.getElementById('error');
  const results = document.getElementById('results');
  let prepared = null;
  let selection = 0;
  let inFlight = false;

  const escapeHtml = (s) => String(s)
    .replace(/&/g, '&amp;')
    .replace(/</g, '&lt;')
    .replace(/>/g, '&gt;')
    .replace(/"/g, '&quot;')
    .replace(/'/g, '&#39;');
  const formatAnalysis = (s) => escapeHtml(s)
    .replace(/\*\*(.+?)\*\*/g, '<strong>$1</strong>')
    .replace(/\r?\n/g, '<br>');

  function resizeImage(file) {
    return new Promise((resolve) => {
      const url = URL.createObjectURL(file);
      const img = new Image();
      img.onload = () => {
        URL.revokeObjectURL(url);
        let width = img.naturalWidth;
        let height = img.naturalHeight;
        if (Math.max(width, height) <= MAX_EDGE) {
          resolve(file);
          return;
        }
        if (width >= height) {
          height = Math.max(1, Math.round(height * MAX_EDGE / width));
          width = MAX_EDGE;
        } else {
          width = Math.max(1, Math.round(width * MAX_EDGE / height));
          height = MAX_EDGE;
        }
        const canvas = document.createElement('canvas');
        canvas.width = width;
        canvas.height = height;
        canvas.getContext('2d').drawImage(img, 0, 0, width, height);
        canvas.toBlob(
          (blob) => resolve(blob ? new File([blob], file.name, { type: blob.type }) : file),
          file.type,
          0.92
        );
      };
      img.onerror = () => {
        URL.revokeObjectURL(url);
        resolve(file);
      };
      img.src = url;
    });
  }

  function showError(message) {
    errorBox.textContent = message;
    errorBox.hidden = false;
  }

  function showResults(data) {
    const found = data.foundUnhealthy || [];
    const list = found.length
      ? '<ul>' + found.map((t) => '<li>' + escapeHtml(t) + '</li>').join('') + '</ul>'
      : '<p class="muted">None of the listed ingredients were found.</p>';
    results.innerHTML =
      '<h2>Ingredients</h2><p id="ingredients">' + formatAnalysis(data.ingredients || '') + '</p>' +
      '<h2>Unhealthy ingredients found</h2><div id="found">' + list + '</div>' +
      '<h2>Health analysis</h2><div id="analysis">' + formatAnalysis(data.analysis || '') + '</div>';
    results.hidden = false;
  }

  input.addEventListener('change', async () => {
    const file = input.files[0];
    const current = ++selection;
    prepared = null;
    errorBox.hidden = true;
    results.hidden = true;
    selected.textContent = file ? file.name : '';
    if (!file) return;
    const resized = await resizeImage(file);
    if (current === selection) prepared = resized;
  });

  form.addEventListener('submit', async (event) => {
    event.preventDefault();
    if (inFlight) return;
    const file = prepared || input.files[0];
    if (!file) {
      showError('Please select an image first.');
      return;
    }
    const body = new FormData();
    body.append('image', file, file.name);

    inFlight = true;
    button.disabled = true;
    button.textContent = 'Analyzing...';
    loading.hidden = false;
    errorBox.hidden = true;
    results.hidden = true;
    try {
      const response = await fetch(form.dataset.api, { method: 'POST', body });
      const data = await response.json().catch(() => ({}));
      if (!response.ok) {
        const detail = data.details ? ': ' + data.details : '';
        throw new Error((data.error || 'Failed to analyze image') + detail);
      }
      showResults(data);
    } catch (err) {
      showError(err.message || 'Failed to analyze image');
    } finally {
      inFlight = false;
      button.disabled = false;
      button.textContent = 'Analyze';
      loading.hidden = true;
    }
  });
})();
"##;
