use crate::models::AttendanceStatus;
use crate::view::{PageSnapshot, ReportLink, Row, ViewPhase};
use std::fmt::Write;

pub const LOADING_NOTICE: &str = "Loading…";

pub fn render_index(page: &PageSnapshot) -> String {
    let disabled = if page.busy { " disabled" } else { "" };
    let alert = render_alert(page.view.alert.as_deref());
    let list = render_list(page);
    let reports = render_reports(&page.view.reports);
    fill_template(INDEX_HTML, |key| match key {
        "ALERT" => Some(alert.as_str()),
        "LIST" => Some(list.as_str()),
        "REPORTS" => Some(reports.as_str()),
        "DISABLED" => Some(disabled),
        _ => None,
    })
}

/// Substitutes `{{KEY}}` markers in one left-to-right pass. Inserted values
/// are never scanned again, so names that look like markers stay as text.
fn fill_template<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}").and_then(|end| Some((end, lookup(&after[..end])?))) {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Contents of `attendance-list`: the notice if there is one, else one row
/// per employee. Always a full replacement.
pub fn render_list(page: &PageSnapshot) -> String {
    if let Some(notice) = &page.view.notice {
        return format!(r#"<p class="notice">{}</p>"#, escape_html(notice));
    }
    if page.view.phase == ViewPhase::Pending {
        return format!(r#"<p class="notice">{LOADING_NOTICE}</p>"#);
    }
    let mut html = String::new();
    for row in &page.view.rows {
        render_row(&mut html, row, page.busy);
    }
    html
}

fn render_row(html: &mut String, row: &Row, busy: bool) {
    let id = row.id.as_str();
    let name = escape_html(&row.name);
    let disabled = if busy { " disabled" } else { "" };
    let _ = write!(
        html,
        r#"
      <form class="employee-row" method="post" action="/select">
        <input type="hidden" name="id" value="{id}" />
        <label for="{id}">{name}</label>
        <select id="{id}" name="status" onchange="this.form.submit()"{disabled}>"#
    );
    for option in AttendanceStatus::ALL {
        let selected = if option == row.status { " selected" } else { "" };
        let _ = write!(
            html,
            r#"
          <option value="{option}"{selected}>{option}</option>"#
        );
    }
    html.push_str(
        r#"
        </select>
      </form>"#,
    );
}

fn render_alert(alert: Option<&str>) -> String {
    match alert {
        Some(message) => format!(
            r#"<div class="alert" role="alert">{}</div>"#,
            escape_html(message)
        ),
        None => String::new(),
    }
}

fn render_reports(reports: &[ReportLink]) -> String {
    if reports.is_empty() {
        return r#"<li class="muted">No reports listed.</li>"#.to_string();
    }
    let mut html = String::new();
    for report in reports {
        let _ = write!(
            html,
            r#"<li><a href="{}" target="_blank" rel="noopener">{}</a></li>"#,
            escape_html(&report.url),
            escape_html(&report.label)
        );
    }
    html
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
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

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Attendance</title>
  <style>
    :root {
      --bg: #f4f1ea;
      --ink: #2b2a28;
      --accent: #2f4858;
      --card: #ffffff;
      --muted: #8b857d;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      border-radius: 20px;
      padding: 28px;
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
    }

    .alert {
      padding: 12px 16px;
      border-radius: 12px;
      background: rgba(47, 72, 88, 0.1);
    }

    .employee-row {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 8px 0;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    .actions {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-weight: 600;
      background: var(--accent);
      color: white;
      cursor: pointer;
    }

    button:disabled {
      opacity: 0.5;
      cursor: default;
    }

    .notice,
    .muted {
      color: var(--muted);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Today's attendance</h1>
    </header>

    {{ALERT}}

    <section id="attendance-list">{{LIST}}
    </section>

    <section class="actions">
      <form method="post" action="/save">
        <button type="submit"{{DISABLED}}>Save attendance</button>
      </form>
      <form method="post" action="/load">
        <button type="submit"{{DISABLED}}>Reload</button>
      </form>
      <form method="get" action="/export/daily" target="_blank">
        <button type="submit">Today's report</button>
      </form>
      <form method="get" action="/export/monthly" target="_blank">
        <input type="month" id="month-picker" name="month" />
        <button type="submit">Monthly report</button>
      </form>
    </section>

    <section>
      <h2>Generated reports</h2>
      <ul id="report-list">{{REPORTS}}</ul>
      <form method="post" action="/reports/refresh">
        <button type="submit"{{DISABLED}}>Refresh list</button>
      </form>
    </section>
  </main>
</body>
</html>
"#;
