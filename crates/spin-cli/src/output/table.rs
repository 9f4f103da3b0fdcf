#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN: usize = 4;
const GAP: &str = "  ";

/// Render an aligned plain-text table. Numeric cells are right-aligned.
///
/// When `max_width` is set, the widest columns are shrunk (never below the
/// header width) and overflowing cells end in `…`.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .chain([header.chars().count(), MIN_COLUMN])
                .max()
                .unwrap_or(MIN_COLUMN)
        })
        .collect::<Vec<_>>();

    if let Some(max_width) = options.max_width {
        shrink_to_fit(&mut widths, headers, max_width);
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&clip(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(GAP);
    lines.push(header_line.trim_end().to_string());
    lines.push("-".repeat(widths.iter().sum::<usize>() + GAP.len() * widths.len().saturating_sub(1)));

    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(col, width)| {
                let cell = clip(row.get(col).map_or("-", String::as_str), *width);
                let padded = pad(&cell, *width, is_numeric(&cell));
                if options.color {
                    highlight(&padded, &cell)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join(GAP);
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let gaps = GAP.len() * widths.len().saturating_sub(1);
    while widths.iter().sum::<usize>() + gaps > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(col, width)| **width > headers[*col].chars().count().max(MIN_COLUMN))
            .max_by_key(|(_, width)| **width)
            .map(|(col, _)| col);
        match widest {
            Some(col) => widths[col] -= 1,
            None => break,
        }
    }
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{value:>width$}")
    } else {
        format!("{value:<width$}")
    }
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.parse::<f64>().is_ok()
}

// Completed flags are the one status worth colouring.
fn highlight(padded: &str, cell: &str) -> String {
    match cell {
        "true" => padded.replacen("true", "\u{1b}[32mtrue\u{1b}[0m", 1),
        "false" => padded.replacen("false", "\u{1b}[2mfalse\u{1b}[0m", 1),
        _ => padded.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    fn rows() -> Vec<Vec<String>> {
        vec![
            vec!["1".into(), "Walk dog".into(), "2".into()],
            vec!["12".into(), "Write the quarterly report".into(), "5".into()],
        ]
    }

    #[test]
    fn columns_align() {
        let table = render_entity_table(&["id", "task_name", "priority"], &rows(), PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-'));
        let name_col = lines[0].find("task_name").unwrap();
        assert_eq!(lines[2].find("Walk dog").unwrap(), name_col);
        assert_eq!(lines[3].find("Write").unwrap(), name_col);
    }

    #[test]
    fn numbers_are_right_aligned() {
        let table = render_entity_table(&["id", "task_name", "priority"], &rows(), PLAIN);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[2].starts_with("   1"));
        assert!(lines[3].starts_with("  12"));
    }

    #[test]
    fn narrow_terminal_truncates_widest_column() {
        let options = TableOptions {
            max_width: Some(30),
            color: false,
        };
        let table = render_entity_table(&["id", "task_name", "priority"], &rows(), options);
        assert!(table.lines().all(|line| line.chars().count() <= 30));
        assert!(table.contains('…'));
    }

    #[test]
    fn color_marks_completed_flags() {
        let options = TableOptions {
            max_width: None,
            color: true,
        };
        let table = render_entity_table(&["completed"], &[vec!["true".into()]], options);
        assert!(table.contains("\u{1b}[32mtrue"));
    }
}
