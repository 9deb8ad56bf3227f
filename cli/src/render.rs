use std::fmt::Write;

use minefield_core::{CellView, Lifecycle, Settings, Snapshot};

/// Three-digit counter display, clamped to what a seven segment panel would show.
pub fn format_for_counter(num: i64) -> String {
    match num {
        ..-99 => "-99".to_string(),
        -99..0 => format!("-{:02}", -num),
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

const fn cell_char(cell: CellView) -> char {
    match cell {
        CellView::Hidden => '#',
        CellView::Flagged => 'F',
        CellView::Revealed(0) => '.',
        CellView::Revealed(count) => (b'0' + count) as char,
        CellView::Mine => '*',
        CellView::TriggeredMine => 'X',
    }
}

const fn lifecycle_label(lifecycle: Lifecycle) -> &'static str {
    match lifecycle {
        Lifecycle::Ready => "ready",
        Lifecycle::Running => "running",
        Lifecycle::Won => "won",
        Lifecycle::Lost => "lost",
    }
}

/// Text rendering of a snapshot: counters line, column header, then one line per row.
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let (rows, columns) = snapshot.size;

    let _ = writeln!(
        out,
        "[{}] {} ({}) [{}]",
        format_for_counter(snapshot.mines_remaining.into()),
        lifecycle_label(snapshot.lifecycle),
        snapshot.current_preset,
        format_for_counter(snapshot.elapsed_secs.into()),
    );

    out.push_str("    ");
    for column in 0..columns {
        let _ = write!(out, "{}", column % 10);
    }
    out.push('\n');

    for row in 0..rows {
        let _ = write!(out, "{row:>3} ");
        for column in 0..columns {
            out.push(cell_char(snapshot.cell_at((row, column))));
        }
        out.push('\n');
    }
    out
}

pub fn render_settings(settings: &Settings) -> String {
    let mut out = String::new();
    for (preset, setting) in settings.iter() {
        let _ = writeln!(
            out,
            "{:<12} {:>3} x {:<3} {:>4} mines",
            preset.name(),
            setting.rows,
            setting.columns,
            setting.mines
        );
    }
    out
}
