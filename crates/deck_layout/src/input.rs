use crate::{
    constants::{
        DEFAULT_BOARD_WIDTH, DEFAULT_EDGE_JOINTS, DEFAULT_INSTALL_WIDTH, DEFAULT_JOINT_WIDTH,
        DEFAULT_MIN_BOARD_WIDTH, FIELD_BOARD_WIDTH, FIELD_INSTALL_WIDTH, FIELD_JOINT_WIDTH,
        FIELD_MIN_BOARD_WIDTH,
    },
    error::{LayoutError, Result},
};
use serde::{Deserialize, Serialize};

/// 検証済みの入力値（mm）
///
/// Only constructible through [`LayoutInput::new`] or [`RawInput::parse`],
/// so the solver can rely on the ranges below without checking again:
/// `install_width > 0`, `board_width > 0`, `joint_width >= 0`,
/// `0 < min_board_width <= board_width`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutInput {
    install_width: f64,
    board_width: f64,
    joint_width: f64,
    min_board_width: f64,
    edge_joints: bool,
}

impl LayoutInput {
    pub fn new(
        install_width: f64,
        board_width: f64,
        joint_width: f64,
        min_board_width: f64,
        edge_joints: bool,
    ) -> Result<Self> {
        require_positive(FIELD_INSTALL_WIDTH, install_width)?;
        require_positive(FIELD_BOARD_WIDTH, board_width)?;
        require_finite(FIELD_JOINT_WIDTH, joint_width)?;
        if joint_width < 0.0 {
            return Err(LayoutError::invalid(
                FIELD_JOINT_WIDTH,
                format!("must be zero or greater, got {joint_width}"),
            ));
        }
        require_positive(FIELD_MIN_BOARD_WIDTH, min_board_width)?;

        // 最低床板幅が通常の板幅より大きい
        if min_board_width > board_width {
            return Err(LayoutError::invalid(
                FIELD_MIN_BOARD_WIDTH,
                format!(
                    "minimum board width {min_board_width} exceeds board width {board_width}"
                ),
            ));
        }

        Ok(Self {
            install_width,
            board_width,
            joint_width,
            min_board_width,
            edge_joints,
        })
    }

    pub fn install_width(&self) -> f64 {
        self.install_width
    }
    pub fn board_width(&self) -> f64 {
        self.board_width
    }
    pub fn joint_width(&self) -> f64 {
        self.joint_width
    }
    pub fn min_board_width(&self) -> f64 {
        self.min_board_width
    }
    pub fn edge_joints(&self) -> bool {
        self.edge_joints
    }

    /// Number of joints for a row of `total_boards` boards.
    ///
    /// With edge joints there is a gap on both outer sides as well, without
    /// them only the gaps between neighbouring boards count.
    pub fn joint_count(&self, total_boards: u32) -> i64 {
        let n = i64::from(total_boards);
        if self.edge_joints { n + 1 } else { n - 1 }
    }

    /// Converts back into the textual form (store, summary round trips).
    pub fn to_raw(&self) -> RawInput {
        RawInput {
            install_width: Some(format_number(self.install_width)),
            board_width: Some(format_number(self.board_width)),
            joint_width: Some(format_number(self.joint_width)),
            min_board_width: Some(format_number(self.min_board_width)),
            edge_joints: Some(self.edge_joints),
        }
    }
}

impl Default for LayoutInput {
    fn default() -> Self {
        Self {
            install_width: DEFAULT_INSTALL_WIDTH,
            board_width: DEFAULT_BOARD_WIDTH,
            joint_width: DEFAULT_JOINT_WIDTH,
            min_board_width: DEFAULT_MIN_BOARD_WIDTH,
            edge_joints: DEFAULT_EDGE_JOINTS,
        }
    }
}

fn require_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LayoutError::invalid(field, format!("must be finite, got {value}")))
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<()> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(LayoutError::invalid(
            field,
            format!("must be greater than zero, got {value}"),
        ));
    }
    Ok(())
}

/// フォーム（コマンドライン）から受け取ったままの入力
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInput {
    pub install_width: Option<String>,
    pub board_width: Option<String>,
    pub joint_width: Option<String>,
    pub min_board_width: Option<String>,
    pub edge_joints: Option<bool>,
}

impl RawInput {
    /// Parses and validates every field.
    ///
    /// # Errors
    /// * [`LayoutError::MissingField`] when a numeric field is absent or blank
    /// * [`LayoutError::NotANumber`] when it does not parse as a number
    /// * [`LayoutError::InvalidInput`] when a value is out of range
    ///
    /// A missing `edge_joints` flag falls back to the default (`true`).
    pub fn parse(&self) -> Result<LayoutInput> {
        let install_width = parse_field(FIELD_INSTALL_WIDTH, self.install_width.as_deref())?;
        let board_width = parse_field(FIELD_BOARD_WIDTH, self.board_width.as_deref())?;
        let joint_width = parse_field(FIELD_JOINT_WIDTH, self.joint_width.as_deref())?;
        let min_board_width =
            parse_field(FIELD_MIN_BOARD_WIDTH, self.min_board_width.as_deref())?;
        let edge_joints = self.edge_joints.unwrap_or(DEFAULT_EDGE_JOINTS);

        LayoutInput::new(
            install_width,
            board_width,
            joint_width,
            min_board_width,
            edge_joints,
        )
    }

    /// Fills every missing field from `fallback`; present fields win.
    pub fn merge_defaults(self, fallback: RawInput) -> RawInput {
        RawInput {
            install_width: non_blank(self.install_width).or(fallback.install_width),
            board_width: non_blank(self.board_width).or(fallback.board_width),
            joint_width: non_blank(self.joint_width).or(fallback.joint_width),
            min_board_width: non_blank(self.min_board_width).or(fallback.min_board_width),
            edge_joints: self.edge_joints.or(fallback.edge_joints),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_field(field: &'static str, value: Option<&str>) -> Result<f64> {
    let text = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(LayoutError::MissingField(field))?;

    text.parse::<f64>()
        .map_err(|source| LayoutError::NotANumber {
            field,
            value: text.to_string(),
            source,
        })
}

/// 表示用の数値整形（150.0 -> "150", 97.5 -> "97.5"）
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(install: &str, board: &str, joint: &str, min: &str, edge: bool) -> RawInput {
        RawInput {
            install_width: Some(install.to_string()),
            board_width: Some(board.to_string()),
            joint_width: Some(joint.to_string()),
            min_board_width: Some(min.to_string()),
            edge_joints: Some(edge),
        }
    }

    #[test]
    fn test_new_accepts_valid_input() {
        let input = LayoutInput::new(3000.0, 150.0, 5.0, 80.0, true).unwrap();
        assert_eq!(input.install_width(), 3000.0);
        assert_eq!(input.board_width(), 150.0);
        assert_eq!(input.joint_width(), 5.0);
        assert_eq!(input.min_board_width(), 80.0);
        assert!(input.edge_joints());
    }

    #[test]
    fn test_zero_joint_width_is_valid() {
        assert!(LayoutInput::new(3000.0, 150.0, 0.0, 80.0, false).is_ok());
    }

    #[test]
    fn test_min_equal_to_board_is_valid() {
        assert!(LayoutInput::new(3000.0, 150.0, 5.0, 150.0, true).is_ok());
    }

    #[test]
    fn test_min_greater_than_board_is_rejected() {
        let err = LayoutInput::new(3000.0, 150.0, 5.0, 151.0, true).unwrap_err();
        match err {
            LayoutError::InvalidInput { field, .. } => assert_eq!(field, FIELD_MIN_BOARD_WIDTH),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        assert!(LayoutInput::new(0.0, 150.0, 5.0, 80.0, true).is_err());
        assert!(LayoutInput::new(-10.0, 150.0, 5.0, 80.0, true).is_err());
        assert!(LayoutInput::new(3000.0, 0.0, 5.0, 80.0, true).is_err());
        assert!(LayoutInput::new(3000.0, 150.0, -1.0, 80.0, true).is_err());
        assert!(LayoutInput::new(3000.0, 150.0, 5.0, 0.0, true).is_err());
        assert!(LayoutInput::new(f64::NAN, 150.0, 5.0, 80.0, true).is_err());
        assert!(LayoutInput::new(3000.0, f64::INFINITY, 5.0, 80.0, true).is_err());
    }

    #[test]
    fn test_joint_count() {
        let with_edges = LayoutInput::new(3000.0, 150.0, 5.0, 80.0, true).unwrap();
        let without_edges = LayoutInput::new(3000.0, 150.0, 5.0, 80.0, false).unwrap();
        assert_eq!(with_edges.joint_count(1), 2);
        assert_eq!(without_edges.joint_count(1), 0);
        for n in 1..=30 {
            assert_eq!(with_edges.joint_count(n) - without_edges.joint_count(n), 2);
        }
    }

    #[test]
    fn test_parse_raw_input() {
        let input = raw(" 3000 ", "150", "5", "80.5", false).parse().unwrap();
        assert_eq!(input.install_width(), 3000.0);
        assert_eq!(input.min_board_width(), 80.5);
        assert!(!input.edge_joints());
    }

    #[test]
    fn test_parse_missing_field() {
        let mut r = raw("3000", "150", "5", "80", true);
        r.board_width = None;
        assert!(matches!(
            r.parse(),
            Err(LayoutError::MissingField(FIELD_BOARD_WIDTH))
        ));

        r.board_width = Some("   ".to_string());
        assert!(matches!(
            r.parse(),
            Err(LayoutError::MissingField(FIELD_BOARD_WIDTH))
        ));
    }

    #[test]
    fn test_parse_not_a_number() {
        let err = raw("3000mm", "150", "5", "80", true).parse().unwrap_err();
        match err {
            LayoutError::NotANumber { field, value, .. } => {
                assert_eq!(field, FIELD_INSTALL_WIDTH);
                assert_eq!(value, "3000mm");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err_is_input(raw("3000", "abc", "5", "80", true)));
    }

    fn err_is_input(r: RawInput) -> bool {
        r.parse().map_err(|e| e.is_input_error()).err().unwrap_or(false)
    }

    #[test]
    fn test_parse_missing_edge_joints_uses_default() {
        let mut r = raw("3000", "150", "5", "80", false);
        r.edge_joints = None;
        assert!(r.parse().unwrap().edge_joints());
    }

    #[test]
    fn test_merge_defaults() {
        let partial = RawInput {
            install_width: Some("2400".to_string()),
            board_width: Some("".to_string()),
            ..RawInput::default()
        };
        let merged = partial.merge_defaults(LayoutInput::default().to_raw());
        assert_eq!(merged.install_width.as_deref(), Some("2400"));
        assert_eq!(merged.board_width.as_deref(), Some("150"));
        assert_eq!(merged.joint_width.as_deref(), Some("5"));
        assert_eq!(merged.min_board_width.as_deref(), Some("80"));
        assert_eq!(merged.edge_joints, Some(true));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(150.0), "150");
        assert_eq!(format_number(97.5), "97.5");
        assert_eq!(format_number(-17.5), "-17.5");
        assert_eq!(format_number(0.0), "0");
    }
}
