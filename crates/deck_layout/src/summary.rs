use crate::{
    constants::ATTRIBUTION,
    input::{LayoutInput, format_number},
    solver::ResultSet,
};
use std::fmt::Write;

/// Human-readable summary of the recommended plan, for sharing.
///
/// Returns `None` when there is no plan to share.
pub fn summarize(input: &LayoutInput, result: &ResultSet) -> Option<String> {
    let best = result.best()?;
    let board = format_number(input.board_width());

    let mut text = String::new();
    // String への書き込みは失敗しない
    let _ = writeln!(text, "Deck board plan");
    let _ = writeln!(
        text,
        "Install width: {}mm",
        format_number(input.install_width())
    );
    let _ = writeln!(
        text,
        "Standard boards: {}mm x {}",
        board, best.standard_boards
    );
    let _ = writeln!(
        text,
        "Trim boards: {}mm x {}",
        format_number(best.adjusted_width),
        best.adjusted_boards
    );
    let _ = writeln!(text, "Total boards: {}", best.total_boards);
    let _ = writeln!(
        text,
        "Cut per trim board: -{}mm",
        format_number(best.width_diff)
    );
    let _ = writeln!(
        text,
        "Actual width: {}mm",
        format_number(best.total_width)
    );
    let _ = writeln!(
        text,
        "Joints: {}mm{}",
        format_number(input.joint_width()),
        if input.edge_joints() {
            " (including both edges)"
        } else {
            ""
        }
    );
    let _ = write!(text, "{}", ATTRIBUTION);

    Some(text)
}
