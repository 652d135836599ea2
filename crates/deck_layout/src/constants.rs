/// Search settings
pub const DEFAULT_MAX_TOTAL_BOARDS: u32 = 30; // 総枚数の探索上限
pub const MAX_TOTAL_BOARDS_LIMIT: u32 = 1000; // config で広げられる上限
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Rounding step for trim widths [mm]
pub const ROUNDING_STEP: f64 = 0.5;

/// Form defaults (mm)
pub const DEFAULT_INSTALL_WIDTH: f64 = 3000.0;
pub const DEFAULT_BOARD_WIDTH: f64 = 150.0;
pub const DEFAULT_JOINT_WIDTH: f64 = 5.0;
pub const DEFAULT_MIN_BOARD_WIDTH: f64 = 80.0;
pub const DEFAULT_EDGE_JOINTS: bool = true;

/// Field names (messages, store keys)
pub const FIELD_INSTALL_WIDTH: &str = "install_width";
pub const FIELD_BOARD_WIDTH: &str = "board_width";
pub const FIELD_JOINT_WIDTH: &str = "joint_width";
pub const FIELD_MIN_BOARD_WIDTH: &str = "min_board_width";
pub const FIELD_EDGE_JOINTS: &str = "edge_joints";

/// Last line of the shared summary
pub const ATTRIBUTION: &str = "Powered by LASCO JAPAN (https://lasco.jp/)";
