//! ASCII table formatter

pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, value) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(value.chars().count());
        }
    }

    let border: String = widths
        .iter()
        .map(|w| format!("+{}", "-".repeat(w + 2)))
        .collect::<String>()
        + "+\n";

    let line = |cells: Vec<&str>| -> String {
        let mut out = String::new();
        for (i, width) in widths.iter().enumerate() {
            let value = cells.get(i).copied().unwrap_or("");
            out.push_str(&format!("| {:<width$} ", value, width = width));
        }
        out.push_str("|\n");
        out
    };

    let mut output = border.clone();
    output.push_str(&line(headers.to_vec()));
    output.push_str(&border);
    for row in rows {
        output.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    if !rows.is_empty() {
        output.push_str(&border);
    }

    output
}
