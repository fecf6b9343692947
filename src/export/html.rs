//! HTML report.
//!
//! A standalone page with one table row per target. DataTables (loaded from a
//! CDN) makes the table sortable and searchable when the page is opened online.

use std::io::{self, Write};

use crate::scan::ScanResult;

const HTML_HEAD: &str = r#"<!DOCTYPE HTML>
<html>
<head>
<meta charset="utf-8">
<title>dns_web_scanner report</title>
<link rel="stylesheet" type="text/css" href="https://ajax.aspnetcdn.com/ajax/jquery.dataTables/1.9.4/css/jquery.dataTables.css">
<script type="text/javascript" charset="utf8" src="https://ajax.aspnetcdn.com/ajax/jQuery/jquery-1.9.1.min.js"></script>
<script type="text/javascript" charset="utf8" src="https://ajax.aspnetcdn.com/ajax/jquery.dataTables/1.9.4/jquery.dataTables.min.js"></script>
<style type="text/css">
.OK {
    color: green;
    font-weight: bold;
}
.BAD {
    color: red;
    font-weight: bold;
}
table,th,td {
    border: 1px solid black;
}
td {
    vertical-align:top;
    padding:2px;
}
table {
    border-collapse:collapse;
    max-width:100%;
}
thead {
    border-bottom: 1px double black;
    background-color: lightgrey;
}
</style>
<script type="text/javascript">
$(document).ready(function(){
  $('#content').dataTable( {
    "bPaginate": false
  });
});
</script>
</head>
<body>
<table id="content">
<thead>
<tr><th>Target</th><th>Result</th><th>Details</th></tr>
</thead>
<tbody>
"#;

/// Writes the results as an HTML page.
pub fn write_html<W: Write>(results: &[ScanResult], sink: &mut W) -> io::Result<()> {
    sink.write_all(HTML_HEAD.as_bytes())?;
    for result in results {
        let verdict = result.verdict_text();
        writeln!(
            sink,
            "<tr><td>{}</td><td class=\"{verdict}\">{verdict}</td><td>{}</td></tr>",
            escape(result.target()),
            escape(&result.step_texts().join(", ")),
        )?;
    }
    writeln!(sink, "</tbody>\n</table>\n<br/>\n<hr>")?;
    writeln!(
        sink,
        "<em>Created by dns_web_scanner Version {}</em>\n</body>\n</html>",
        env!("CARGO_PKG_VERSION")
    )?;
    sink.flush()
}

/// Escapes text for use in element content and quoted attributes.
fn escape(text: &str) -> String {
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
