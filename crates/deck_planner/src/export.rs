use crate::error::{PlannerError, Result};
use chrono::Local;
use csv::WriterBuilder;
use deck_layout::{LayoutInput, ResultSet, format_number};
use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

const CSV_HEADER: [&str; 8] = [
    "Rank",
    "TotalBoards",
    "StandardBoards",
    "StandardWidth",
    "AdjustedBoards",
    "AdjustedWidth",
    "WidthDiff",
    "TotalWidth",
];

pub fn export_to_csv_with_path(
    input: &LayoutInput,
    result: &ResultSet,
    output_dir: Option<&Path>,
) -> Result<PathBuf> {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let filename = format!("deck_plan_{timestamp}.csv");

    let file_path = if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir).map_err(|e| PlannerError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
        dir.join(&filename)
    } else {
        filename.into()
    };

    let file = File::create(&file_path).map_err(|e| PlannerError::CreateFile {
        path: file_path.clone(),
        source: e,
    })?;

    let writer = BufWriter::new(file);
    #[allow(unused_mut)]
    let mut builder = WriterBuilder::new();
    #[cfg(windows)]
    {
        use csv::Terminator;
        builder = builder.terminator(Terminator::CRLF);
    }

    let mut wtr = builder.from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    let standard_width = format_number(input.board_width());
    for (i, c) in result.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            c.total_boards.to_string(),
            c.standard_boards.to_string(),
            standard_width.clone(),
            c.adjusted_boards.to_string(),
            format_number(c.adjusted_width),
            format_number(c.width_diff),
            format_number(c.total_width),
        ])?;
    }

    wtr.flush()?;
    Ok(file_path)
}
