use super::BoardReport;

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// URLs land inside a single-quoted window.open argument before attribute
// escaping, so quote/backslash must survive both layers.
fn js_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn open_handler(url: &str) -> String {
    escape_html(&format!("window.open('{}', '_blank')", js_single_quoted(url)))
}

pub fn render_html(report: &BoardReport) -> Vec<u8> {
    let mut head_cells = String::new();
    head_cells.push_str("<th class=\"name\">name</th>");
    for header in report.headers.iter() {
        head_cells.push_str(&format!(
            "<th class=\"problem\" onclick=\"{}\">{}</th>",
            open_handler(&header.link),
            escape_html(&header.title)
        ));
    }
    head_cells.push_str("<th class=\"solved\">solved</th>");

    let mut body_rows = String::new();
    for row in report.rows.iter() {
        body_rows.push_str("      <tr>");
        body_rows.push_str(&format!(
            "<th class=\"name\" scope=\"row\">{}</th>",
            escape_html(&row.name)
        ));
        for cell in row.cells.iter() {
            body_rows.push_str(&format!(
                "<td title=\"{}\" bgcolor=\"{}\" onclick=\"{}\">{}</td>",
                escape_html(cell.label),
                cell.color,
                open_handler(&cell.link),
                escape_html(&cell.code)
            ));
        }
        body_rows.push_str(&format!("<td class=\"solved\">{}</td>", row.solved));
        body_rows.push_str("</tr>\n");
    }

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>Scoreboard - group {group_id}</title>
  <style>
    body {{ font-family: sans-serif; margin: 2rem; color: #222; }}
    table {{ border-collapse: collapse; }}
    th, td {{ border: 1px solid #ccc; padding: 0.35rem 0.8rem; text-align: center; }}
    th.problem, td[onclick] {{ cursor: pointer; }}
    th.name {{ text-align: left; }}
    td.solved {{ font-weight: bold; }}
    caption {{ margin-bottom: 0.6rem; font-weight: bold; text-align: left; }}
  </style>
</head>
<body>
  <table>
    <caption>Group {group_id} scoreboard</caption>
    <thead>
      <tr>{head_cells}</tr>
    </thead>
    <tbody>
{body_rows}    </tbody>
  </table>
</body>
</html>"####,
        group_id = report.group_id,
    );

    html.into_bytes()
}
