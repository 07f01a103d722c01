use parallel_highlight::{LogEntry, Session, Side, escape_html};

/// A standalone HTML page showing both documents next to each other,
/// followed by the activity log.
pub fn render_page(session: &Session) -> String {
    let log = session
        .log()
        .iter()
        .map(format_log_entry)
        .map(|line| format!("<li>{}</li>", escape_html(&line)))
        .collect::<String>();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>parallel-highlight</title>
<style>
  main {{ display: flex; gap: 2em; }}
  section {{ flex: 1; white-space: pre-wrap; font-family: serif; line-height: 1.6; }}
</style>
</head>
<body>
<main>
<section>{left}</section>
<section>{right}</section>
</main>
<ol>{log}</ol>
</body>
</html>
"#,
        left = session.to_html(Side::Left),
        right = session.to_html(Side::Right),
    )
}

pub fn format_log_entry(entry: &LogEntry) -> String {
    match entry.span {
        Some(span) => format!(
            "[{:?}] {} {}..{}: {}",
            entry.kind, entry.side, span.start, span.end, entry.text
        ),
        None => format!("[{:?}] {}: {}", entry.kind, entry.side, entry.text),
    }
}
