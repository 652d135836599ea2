use deck_layout::{LayoutInput, ResultSet, format_number};
use std::fmt::Write;

/// Renders the plans the way the calculator lists them, or the no-solution
/// message when nothing fits.
pub fn render_report(input: &LayoutInput, result: &ResultSet) -> String {
    let mut out = String::new();

    if result.is_empty() {
        let _ = writeln!(out, "No layout found.");
        let _ = writeln!(
            out,
            "No arrangement satisfies the conditions. Review the install width or the minimum board width."
        );
        return out;
    }

    let board = format_number(input.board_width());
    let _ = writeln!(out, "{} plan(s) found", result.len());

    for (i, c) in result.iter().enumerate() {
        let _ = writeln!(out);
        if i == 0 {
            let _ = writeln!(out, "Plan {} (recommended)", i + 1);
        } else {
            let _ = writeln!(out, "Plan {}", i + 1);
        }
        let _ = writeln!(
            out,
            "  Standard boards: {:>3}  ({}mm x {})",
            c.standard_boards, board, c.standard_boards
        );
        let _ = writeln!(
            out,
            "  Trim boards:     {:>3}  ({}mm x {})",
            c.adjusted_boards,
            format_number(c.adjusted_width),
            c.adjusted_boards
        );
        let _ = writeln!(out, "  Total boards:    {:>3}", c.total_boards);
        let _ = writeln!(out, "  Cut width:       -{}mm", format_number(c.width_diff));
        let _ = writeln!(out, "  Actual width:    {}mm", format_number(c.total_width));
    }
    out
}
