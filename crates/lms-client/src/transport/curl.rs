//! Shell-ready reproductions of recorded requests.

use super::RequestRecord;

/// Renders a request as a `curl` command.
///
/// Single quotes inside values are escaped so the output can be pasted into
/// a POSIX shell as-is.
pub fn make_curl(record: &RequestRecord) -> String {
    let mut parts = vec![
        format!("curl -X {}", quote(&record.method)),
        quote(&record.url),
    ];
    for (name, value) in &record.headers {
        parts.push(format!("-H {}", quote(&format!("{}: {}", name, value))));
    }
    if let Some(body) = &record.body {
        parts.push(format!("-d {}", quote(body)));
    }
    parts.join(" \\\n ")
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
