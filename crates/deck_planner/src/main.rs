mod config;
mod error;
mod export;
mod report;
mod store;

use anyhow::{Context, Result};
use clap::Parser;
use deck_layout::{LayoutError, RawInput, compute_layout_with, summarize};
use log::{debug, error, info, warn};
use std::path::PathBuf;
use store::JsonFileStore;

#[derive(Parser, Debug)]
#[command(author, version, about = "Deck floorboard calculator: standard boards plus one trim width", long_about = None)]
struct Args {
    /// Install width [mm]
    #[arg(short = 'w', long = "install-width")]
    install_width: Option<String>,

    /// Standard board width [mm]
    #[arg(short = 'b', long = "board-width")]
    board_width: Option<String>,

    /// Joint (gap) width between boards [mm]
    #[arg(short = 'j', long = "joint-width")]
    joint_width: Option<String>,

    /// Minimum acceptable trim board width [mm]
    #[arg(short = 'm', long = "min-board-width")]
    min_board_width: Option<String>,

    /// Also keep a joint at both outer edges (true/false)
    #[arg(short = 'e', long = "edge-joints", value_name = "BOOL")]
    edge_joints: Option<bool>,

    /// Solver configuration file (TOML)
    #[arg(short = 'c', long = "config", default_value = "config/default.toml")]
    config: PathBuf,

    /// Print a shareable summary of the recommended plan
    #[arg(short = 's', long = "summary")]
    summary: bool,

    /// Export the plans as CSV to DECK_PLANNER_OUTPUT_DIR (default: ./csv)
    #[arg(long = "csv")]
    csv: bool,

    /// Do not remember these inputs for the next run
    #[arg(long = "no-save")]
    no_save: bool,
}

impl Args {
    fn raw_input(&self) -> RawInput {
        RawInput {
            install_width: self.install_width.clone(),
            board_width: self.board_width.clone(),
            joint_width: self.joint_width.clone(),
            min_board_width: self.min_board_width.clone(),
            edge_joints: self.edge_joints,
        }
    }
}

const EXIT_FAILURE: i32 = 1;
const EXIT_INVALID_INPUT: i32 = 2;

fn main() {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();
    let result = config::Config::from_env()
        .map_err(anyhow::Error::from)
        .and_then(|env_config| run(&args, &env_config));

    if let Err(e) = result {
        error!("Error: {e}");
        for cause in e.chain().skip(1) {
            error!("  caused by: {cause}");
        }

        let code = exit_code(&e);
        if code == EXIT_INVALID_INPUT {
            error!("Hint: check the values given with -w/-b/-j/-m (mm, numbers only).");
        }
        std::process::exit(code);
    }
}

/// 入力値の誤りは 2、それ以外の失敗は 1
fn exit_code(err: &anyhow::Error) -> i32 {
    let invalid_input = err.chain().any(|cause| {
        cause
            .downcast_ref::<LayoutError>()
            .is_some_and(LayoutError::is_input_error)
    });
    if invalid_input {
        EXIT_INVALID_INPUT
    } else {
        EXIT_FAILURE
    }
}

fn run(args: &Args, env_config: &config::Config) -> Result<()> {
    let solver_config = if args.config.exists() {
        deck_layout::Config::load_from_file(&args.config)
            .with_context(|| format!("Failed to load config {}", args.config.display()))?
    } else {
        warn!(
            "Config file not found: {}, using default settings",
            args.config.display()
        );
        deck_layout::Config::default()
    };
    let options = solver_config.search_options();

    // コマンドライン -> 前回の入力 -> 設定ファイルの初期値
    let mut input_store = JsonFileStore::open(&env_config.state_dir);
    debug!("Input store: {}", input_store.path().display());
    let raw = args
        .raw_input()
        .merge_defaults(store::load_last_input(&input_store))
        .merge_defaults(solver_config.defaults.to_raw()?);

    let input = raw.parse().context("Invalid input")?;
    info!(
        "Install width {}mm, board {}mm, joint {}mm, min {}mm, edge joints: {}",
        input.install_width(),
        input.board_width(),
        input.joint_width(),
        input.min_board_width(),
        input.edge_joints()
    );

    let result = compute_layout_with(&input, &options);
    print!("{}", report::render_report(&input, &result));

    if args.summary {
        match summarize(&input, &result) {
            Some(text) => println!("\n{text}"),
            None => info!("Nothing to summarize."),
        }
    }

    if args.csv {
        let path = export::export_to_csv_with_path(&input, &result, Some(&env_config.output_dir))
            .context("Failed to export plans")?;
        info!("Plans saved to: {}", path.display());
    }

    // 保存はベストエフォート
    if args.no_save {
        debug!("--no-save: inputs not remembered");
    } else if let Err(e) = store::save_last_input(&mut input_store, &input) {
        warn!("Could not remember inputs: {e}");
    }

    Ok(())
}
