//! Minimal HTML table scanning for the scraped portal pages.
//!
//! Tag detection is ASCII case-insensitive and works on local blocks
//! (`<table>…</table>`, `<tr>…</tr>`) instead of a full document tree.
//! Nested tables are not supported; none of the scraped pages use them.

/// One `<table>` element: its `class` tokens and its rows of cell text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub classes: Vec<String>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    /// Text of `<th>` cells.
    pub headers: Vec<String>,
    /// Text of `<td>` cells.
    pub cells: Vec<String>,
}

impl Table {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Header texts of every row, in document order.
    pub fn header_texts(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .flat_map(|r| r.headers.iter().map(String::as_str))
    }

    /// Rows after the first one, which is taken to be the header row.
    pub fn body_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

/// Extracts every table of the document, in order.
pub fn tables(html: &str) -> Vec<Table> {
    let lower = html.to_ascii_lowercase();
    let mut out = Vec::new();
    let mut pos = 0;

    while let Some(start) = find_tag(&lower, "table", pos) {
        let Some(open_end) = lower[start..].find('>').map(|i| start + i + 1) else {
            break;
        };
        let close = lower[open_end..]
            .find("</table")
            .map_or(lower.len(), |i| open_end + i);

        out.push(Table {
            classes: class_tokens(&html[start..open_end]),
            rows: rows(&html[open_end..close], &lower[open_end..close]),
        });
        pos = close;
    }
    out
}

fn rows(html: &str, lower: &str) -> Vec<Row> {
    let mut out = Vec::new();
    let mut pos = 0;

    while let Some(start) = find_tag(lower, "tr", pos) {
        let body_start = lower[start..].find('>').map_or(lower.len(), |i| start + i + 1);
        let end = [
            lower[body_start..].find("</tr").map(|i| body_start + i),
            find_tag(lower, "tr", body_start),
        ]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(lower.len());

        out.push(cells(&html[body_start..end], &lower[body_start..end]));
        pos = end;
    }
    out
}

fn cells(html: &str, lower: &str) -> Row {
    let mut row = Row::default();
    let mut pos = 0;

    loop {
        let next_th = find_tag(lower, "th", pos);
        let next_td = find_tag(lower, "td", pos);
        let (start, is_header) = match (next_th, next_td) {
            (Some(h), Some(d)) if h < d => (h, true),
            (_, Some(d)) => (d, false),
            (Some(h), None) => (h, true),
            (None, None) => break,
        };
        let body_start = lower[start..].find('>').map_or(lower.len(), |i| start + i + 1);
        let end = [
            lower[body_start..].find("</t").map(|i| body_start + i),
            find_tag(lower, "td", body_start),
            find_tag(lower, "th", body_start),
        ]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(lower.len());

        let text = text_content(&html[body_start..end]);
        if is_header {
            row.headers.push(text);
        } else {
            row.cells.push(text);
        }
        pos = end;
    }
    row
}

/// Finds the next opening `<name` tag at or after `from`, requiring the tag
/// name to end there (so `<tr` does not match `<track`).
fn find_tag(lower: &str, name: &str, from: usize) -> Option<usize> {
    let needle = format!("<{}", name);
    let mut pos = from;
    while let Some(i) = lower.get(pos..)?.find(&needle) {
        let at = pos + i;
        let after = lower.as_bytes().get(at + needle.len()).copied();
        match after {
            Some(b'>') | Some(b'/') | None => return Some(at),
            Some(c) if c.is_ascii_whitespace() => return Some(at),
            _ => pos = at + needle.len(),
        }
    }
    None
}

fn class_tokens(open_tag: &str) -> Vec<String> {
    let lower = open_tag.to_ascii_lowercase();
    let Some(i) = lower.find("class") else {
        return Vec::new();
    };
    let rest = open_tag[i + "class".len()..].trim_start();
    let Some(rest) = rest.strip_prefix('=') else {
        return Vec::new();
    };
    let rest = rest.trim_start();
    let value = match rest.chars().next() {
        Some(q @ ('"' | '\'')) => rest[1..].split(q).next().unwrap_or(""),
        _ => rest
            .split(|c: char| c.is_whitespace() || c == '>')
            .next()
            .unwrap_or(""),
    };
    value.split_whitespace().map(str::to_string).collect()
}

/// Strips tags, decodes the common entities and collapses whitespace.
pub fn text_content(fragment: &str) -> String {
    let mut text = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for c in fragment.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
