//! Plain-text table rendering for people.
//!
//! Widths are measured in terminal cells and padding is applied before
//! colouring, so ANSI escapes never disturb alignment.

use crate::model::Person;
use colored::Colorize;
use unicode_width::UnicodeWidthStr;

const TITLE: &str = "People";
const HEADERS: [&str; 4] = ["№", "Name", "Surname", "Debt"];

/// Render people as a bordered table numbered from 1 in display order.
#[must_use]
pub fn render_people(people: &[Person]) -> String {
    let rows: Vec<[String; 4]> = people
        .iter()
        .enumerate()
        .map(|(i, p)| {
            [
                (i + 1).to_string(),
                p.name.clone(),
                p.surname.clone(),
                p.debt.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(width);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(width(cell));
        }
    }

    let total: usize = widths.iter().map(|w| w + 3).sum::<usize>() + 1;
    let mut out = String::new();

    out.push_str(&center(TITLE, total).bold().to_string());
    out.push('\n');
    out.push_str(&border(&widths, '┌', '┬', '┐'));

    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| pad_left(h, w).blue().bold().to_string())
        .collect();
    out.push_str(&line(&header));
    out.push_str(&border(&widths, '├', '┼', '┤'));

    for row in &rows {
        let cells = vec![
            center(&row[0], widths[0]).cyan().to_string(),
            pad_left(&row[1], widths[1]).green().to_string(),
            pad_left(&row[2], widths[2]).magenta().to_string(),
            pad_right(&row[3], widths[3]).red().to_string(),
        ];
        out.push_str(&line(&cells));
    }

    out.push_str(&border(&widths, '└', '┴', '┘'));
    out
}

/// Escape a value for CSV output (wrap in quotes if it contains commas, quotes, or newlines).
#[must_use]
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn pad_left(s: &str, w: usize) -> String {
    format!("{s}{}", " ".repeat(w.saturating_sub(width(s))))
}

fn pad_right(s: &str, w: usize) -> String {
    format!("{}{s}", " ".repeat(w.saturating_sub(width(s))))
}

fn center(s: &str, w: usize) -> String {
    let gap = w.saturating_sub(width(s));
    let left = gap / 2;
    format!("{}{s}{}", " ".repeat(left), " ".repeat(gap - left))
}

fn border(widths: &[usize; 4], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}\n", segments.join(&mid.to_string()))
}

fn line(cells: &[String]) -> String {
    format!("│ {} │\n", cells.join(" │ "))
}
