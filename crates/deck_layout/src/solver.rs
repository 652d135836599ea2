use crate::{
    constants::{DEFAULT_MAX_RESULTS, DEFAULT_MAX_TOTAL_BOARDS},
    input::LayoutInput,
    rounding::round_half,
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 探索設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// 総枚数の上限（1..=max_total_boards を全探索）
    pub max_total_boards: u32,
    /// 返す提案の最大件数
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_total_boards: DEFAULT_MAX_TOTAL_BOARDS,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// One layout plan: `standard_boards` full boards plus `adjusted_boards`
/// trim boards cut to `adjusted_width`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub total_boards: u32,
    pub standard_boards: u32,
    pub adjusted_boards: u32,
    /// 幅調整板の幅（0.5mm 単位）
    pub adjusted_width: f64,
    /// カット幅 = 板幅 - 調整板幅（0.5mm 単位）
    pub width_diff: f64,
    /// 実際の施工幅（0.5mm 単位）
    pub total_width: f64,
}

/// Ranked plans, at most one per trim-board count. Empty when no layout fits.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    candidates: Vec<Candidate>,
}

impl ResultSet {
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// おすすめ（先頭）の提案
    pub fn best(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

/// Computes the ranked layout plans with the default search options
/// (up to 30 boards, 5 plans).
pub fn compute_layout(input: &LayoutInput) -> ResultSet {
    compute_layout_with(input, &SearchOptions::default())
}

/// Computes the ranked layout plans.
///
/// 1. enumerate every (total, trim) board count up to `max_total_boards`
/// 2. sort by trim-board count, then by widest trim width
/// 3. keep the first plan for each trim-board count, up to `max_results`
pub fn compute_layout_with(input: &LayoutInput, options: &SearchOptions) -> ResultSet {
    let mut candidates = enumerate_candidates(input, options.max_total_boards);
    let feasible = candidates.len();

    rank_candidates(&mut candidates);
    let candidates = dedup_by_adjusted_boards(candidates, options.max_results);

    log::debug!(
        "layout search: cap={} feasible={} returned={}",
        options.max_total_boards,
        feasible,
        candidates.len()
    );

    ResultSet { candidates }
}

/// Every feasible plan, in enumeration order (total boards, then trim boards).
///
/// A plan without trim boards is never produced, even when the standard
/// boards alone would fill the width exactly.
pub fn enumerate_candidates(input: &LayoutInput, max_total_boards: u32) -> Vec<Candidate> {
    let board = input.board_width();
    let min_board = input.min_board_width();

    let mut candidates = Vec::new();
    for total_boards in 1..=max_total_boards {
        // 両端目地の有無で目地の数が変わる
        let total_joint_width = input.joint_count(total_boards) as f64 * input.joint_width();
        let available_width = input.install_width() - total_joint_width;

        for adjusted_boards in 1..=total_boards {
            let standard_boards = total_boards - adjusted_boards;
            let remaining_width = available_width - f64::from(standard_boards) * board;
            let adjusted_width = round_half(remaining_width / f64::from(adjusted_boards));

            if adjusted_width < min_board || adjusted_width > board {
                continue;
            }

            let total_width = f64::from(standard_boards) * board
                + f64::from(adjusted_boards) * adjusted_width
                + total_joint_width;

            candidates.push(Candidate {
                total_boards,
                standard_boards,
                adjusted_boards,
                adjusted_width,
                width_diff: round_half(board - adjusted_width),
                total_width: round_half(total_width),
            });
        }
    }
    candidates
}

/// Fewest trim boards first, then the widest trim board (least material cut).
/// The sort is stable, so full ties keep the smaller total board count.
pub fn rank_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        a.adjusted_boards.cmp(&b.adjusted_boards).then_with(|| {
            b.adjusted_width
                .partial_cmp(&a.adjusted_width)
                .unwrap_or(Ordering::Equal)
        })
    });
}

/// Keeps the first plan per trim-board count of an already ranked list.
pub fn dedup_by_adjusted_boards(candidates: Vec<Candidate>, max_results: usize) -> Vec<Candidate> {
    candidates
        .into_iter()
        .unique_by(|c| c.adjusted_boards)
        .take(max_results)
        .collect()
}
