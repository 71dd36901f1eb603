// 차트 패턴 인식 모듈
// 컵앤핸들, 역헤드앤숄더 두 스캐너를 제공합니다.

pub mod cup_handle;
pub mod head_shoulders;

pub use cup_handle::{CupHandleConfig, CupHandleScanner};
pub use head_shoulders::{HeadShouldersConfig, HeadShouldersScanner};

use crate::model::Candle;
use serde::Serialize;

/// 인식된 차트 패턴
///
/// 모든 인덱스는 전체 캔들 시계열 기준입니다. 두 스캐너는 독립적으로
/// 동작하며 패턴 간 중복 배제는 하지 않습니다 (표시 계층에서 선별).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Pattern {
    /// 컵앤핸들 형성
    CupAndHandle {
        cup_start_index: usize,
        cup_bottom_index: usize,
        cup_end_index: usize,
        handle_start_index: usize,
        handle_end_index: usize,
        left_rim_price: f64,
        right_rim_price: f64,
        cup_bottom_price: f64,
        handle_low_price: f64,
        breakout_index: Option<usize>,
        breakout_price: Option<f64>,
    },
    /// 역헤드앤숄더 형성
    InvertedHeadAndShoulders {
        left_shoulder_index: usize,
        head_index: usize,
        right_shoulder_index: usize,
        neckline_price: f64,
        left_shoulder_price: f64,
        head_price: f64,
        right_shoulder_price: f64,
        breakout_index: Option<usize>,
        breakout_price: Option<f64>,
    },
}

/// 구간에서 고가 최댓값의 (인덱스, 가격)을 찾습니다.
///
/// # Arguments
/// * `data` - 캔들 시계열
/// * `start` - 시작 인덱스 (포함)
/// * `end` - 끝 인덱스 (미포함)
pub(crate) fn highest_high<C: Candle>(data: &[C], start: usize, end: usize) -> Option<(usize, f64)> {
    data.get(start..end)?
        .iter()
        .enumerate()
        .map(|(offset, candle)| (start + offset, candle.high_price()))
        .fold(None, |best: Option<(usize, f64)>, (i, high)| match best {
            Some((_, best_high)) if best_high >= high => best,
            _ => Some((i, high)),
        })
}

/// 구간에서 저가 최솟값의 (인덱스, 가격)을 찾습니다.
///
/// # Arguments
/// * `data` - 캔들 시계열
/// * `start` - 시작 인덱스 (포함)
/// * `end` - 끝 인덱스 (미포함)
pub(crate) fn lowest_low<C: Candle>(data: &[C], start: usize, end: usize) -> Option<(usize, f64)> {
    data.get(start..end)?
        .iter()
        .enumerate()
        .map(|(offset, candle)| (start + offset, candle.low_price()))
        .fold(None, |best: Option<(usize, f64)>, (i, low)| match best {
            Some((_, best_low)) if best_low <= low => best,
            _ => Some((i, low)),
        })
}

/// 구간에서 종가가 기준 가격을 넘는 첫 캔들을 찾습니다 (돌파 탐색).
///
/// # Arguments
/// * `data` - 캔들 시계열
/// * `start` - 탐색 시작 인덱스 (포함)
/// * `end` - 탐색 끝 인덱스 (미포함, 시계열 길이로 잘림)
/// * `level` - 돌파 기준 가격
pub(crate) fn find_breakout<C: Candle>(
    data: &[C],
    start: usize,
    end: usize,
    level: f64,
) -> Option<(usize, f64)> {
    let end = end.min(data.len());
    data.get(start..end)?
        .iter()
        .enumerate()
        .find(|(_, candle)| candle.close_price() > level)
        .map(|(offset, candle)| (start + offset, candle.close_price()))
}
