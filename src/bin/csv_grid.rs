// Renders an arbitrary CSV file as a static, scrollable HTML grid with
// sticky frozen rows/columns and a client-side text search box.
//
// Usage: csv_grid <input.csv> [output.html]
// Styling knobs come from the environment: GRID_TITLE, GRID_CELL_WIDTH,
// GRID_CELL_HEIGHT, GRID_FREEZE_ROWS, GRID_FREEZE_COLS.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};

struct GridOptions {
    title: String,
    cell_width: u32,
    cell_height: u32,
    freeze_rows: usize,
    freeze_cols: usize,
}

impl GridOptions {
    fn from_env() -> Self {
        GridOptions {
            title: env_or("GRID_TITLE", "CSV Grid"),
            cell_width: env_parsed("GRID_CELL_WIDTH", 140),
            cell_height: env_parsed("GRID_CELL_HEIGHT", 24),
            freeze_rows: env_parsed("GRID_FREEZE_ROWS", 1),
            freeze_cols: env_parsed("GRID_FREEZE_COLS", 0),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let input = PathBuf::from(
        args.next()
            .context("usage: csv_grid <input.csv> [output.html]")?,
    );
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| input.with_extension("html"));

    let csv = std::fs::read_to_string(&input)
        .with_context(|| format!("reading {}", input.display()))?;
    let html = render_grid(&csv, &GridOptions::from_env());

    std::fs::write(&output, html).with_context(|| format!("writing {}", output.display()))?;
    println!("wrote {}", output.display());
    Ok(())
}

/// Naive comma split per line; the season exporter applies no quoting, so
/// neither does this.
fn parse_cells(csv: &str) -> Vec<Vec<&str>> {
    csv.lines().map(|line| line.split(',').collect()).collect()
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_grid(csv: &str, opts: &GridOptions) -> String {
    let rows = parse_cells(csv);
    let title = escape_html(&opts.title);

    let mut body = String::new();
    for (r, cells) in rows.iter().enumerate() {
        let row_class = if r < opts.freeze_rows { " class=\"frozen-row\"" } else { "" };
        let _ = write!(body, "<tr{}>", row_class);
        for (c, cell) in cells.iter().enumerate() {
            let col_class = if c < opts.freeze_cols { " class=\"frozen-col\"" } else { "" };
            let _ = write!(body, "<td{}>{}</td>", col_class, escape_html(cell));
        }
        body.push_str("</tr>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ margin: 0; font: 13px/1.4 sans-serif; }}
#toolbar {{ position: sticky; top: 0; z-index: 3; background: #fff; padding: 6px 8px; border-bottom: 1px solid #ccc; }}
#wrap {{ overflow: auto; height: calc(100vh - 40px); }}
table {{ border-collapse: collapse; }}
td {{ min-width: {w}px; height: {h}px; border: 1px solid #ddd; padding: 0 6px; white-space: nowrap; background: #fff; }}
tr.frozen-row td {{ position: sticky; top: 0; z-index: 2; background: #f0f0f0; font-weight: bold; }}
td.frozen-col {{ position: sticky; left: 0; z-index: 1; background: #f7f7f7; }}
tr.frozen-row td.frozen-col {{ z-index: 4; }}
</style>
</head>
<body>
<div id="toolbar">{title} <input id="search" type="text" placeholder="search..."></div>
<div id="wrap"><table id="grid">
{body}</table></div>
<script>
document.getElementById('search').addEventListener('input', function () {{
  var needle = this.value.toLowerCase();
  var rows = document.querySelectorAll('#grid tr');
  rows.forEach(function (row) {{
    if (row.classList.contains('frozen-row')) return;
    var hit = !needle || row.textContent.toLowerCase().indexOf(needle) !== -1;
    row.style.display = hit ? '' : 'none';
  }});
}});
</script>
</body>
</html>
"#,
        title = title,
        w = opts.cell_width,
        h = opts.cell_height,
        body = body,
    )
}
