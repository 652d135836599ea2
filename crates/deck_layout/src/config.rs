use crate::{
    constants::{
        DEFAULT_BOARD_WIDTH, DEFAULT_EDGE_JOINTS, DEFAULT_INSTALL_WIDTH, DEFAULT_JOINT_WIDTH,
        DEFAULT_MAX_RESULTS, DEFAULT_MAX_TOTAL_BOARDS, DEFAULT_MIN_BOARD_WIDTH,
        MAX_TOTAL_BOARDS_LIMIT,
    },
    error::{LayoutError, Result},
    input::{LayoutInput, RawInput},
    solver::SearchOptions,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// メイン設定構造体
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub defaults: InputDefaults,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SolverConfig {
    #[serde(default = "default_max_total_boards")]
    pub max_total_boards: u32, // 総枚数の探索上限（デフォルト30）
    #[serde(default = "default_max_results")]
    pub max_results: usize, // 提案の最大件数（デフォルト5）
}

fn default_max_total_boards() -> u32 {
    DEFAULT_MAX_TOTAL_BOARDS
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_total_boards: DEFAULT_MAX_TOTAL_BOARDS,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// フォームの初期値
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputDefaults {
    pub install_width: f64,
    pub board_width: f64,
    pub joint_width: f64,
    pub min_board_width: f64,
    pub edge_joints: bool,
}

impl Default for InputDefaults {
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

impl InputDefaults {
    pub fn to_input(&self) -> Result<LayoutInput> {
        LayoutInput::new(
            self.install_width,
            self.board_width,
            self.joint_width,
            self.min_board_width,
            self.edge_joints,
        )
    }

    pub fn to_raw(&self) -> Result<RawInput> {
        Ok(self.to_input()?.to_raw())
    }
}

impl Config {
    /// 設定ファイルから読み込み
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            LayoutError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_toml_str(&content).map_err(|e| match e {
            LayoutError::Config(msg) => LayoutError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                msg
            )),
            other => other,
        })?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 設定の検証
    pub fn validate(&self) -> Result<()> {
        let solver = &self.solver;
        if solver.max_total_boards == 0 || solver.max_total_boards > MAX_TOTAL_BOARDS_LIMIT {
            return Err(LayoutError::Config(format!(
                "max_total_boards must be between 1 and {}, got {}",
                MAX_TOTAL_BOARDS_LIMIT, solver.max_total_boards
            )));
        }

        if solver.max_results == 0 {
            return Err(LayoutError::Config(
                "max_results must be at least 1".to_string(),
            ));
        }

        self.defaults
            .to_input()
            .map_err(|e| LayoutError::Config(format!("Invalid [defaults]: {}", e)))?;

        Ok(())
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            max_total_boards: self.solver.max_total_boards,
            max_results: self.solver.max_results,
        }
    }
}
