use common_test_utils::*;

use chart_engine::pattern::{HeadShouldersConfig, HeadShouldersScanner, Pattern};

/// 골 3개(저가 95 / 90 / 94.5)와 넥라인 100, 돌파를 담은 40캔들 시계열
///
/// 인덱스 8·18·28에 골을 두고 그 사이 고가는 전부 100으로 고정해
/// 넥라인이 정확히 100이 되게 합니다. 인덱스 33부터 종가 101로
/// 넥라인을 돌파합니다.
fn ihs_bars() -> Vec<(f64, f64, f64, f64)> {
    let mut bars = vec![(98.5, 100.0, 97.0, 99.0); 40];
    bars[8] = (97.0, 100.0, 95.0, 98.0);
    bars[18] = (95.0, 100.0, 90.0, 96.0);
    bars[28] = (96.5, 100.0, 94.5, 98.0);
    for bar in bars.iter_mut().skip(33) {
        *bar = (100.0, 101.5, 99.5, 101.0);
    }
    bars
}

#[test]
fn test_detects_inverted_head_and_shoulders() {
    let candles = candles_from_ohlc(&ihs_bars());
    let scanner: HeadShouldersScanner<TestCandle> =
        HeadShouldersScanner::new(HeadShouldersConfig::default());

    let patterns = scanner.scan(&candles);
    assert_eq!(patterns.len(), 1);

    match &patterns[0] {
        Pattern::InvertedHeadAndShoulders {
            left_shoulder_index,
            head_index,
            right_shoulder_index,
            neckline_price,
            left_shoulder_price,
            head_price,
            right_shoulder_price,
            breakout_index,
            breakout_price,
        } => {
            assert_eq!(*left_shoulder_index, 8);
            assert_eq!(*head_index, 18);
            assert_eq!(*right_shoulder_index, 28);
            assert_eq!(*left_shoulder_price, 95.0);
            assert_eq!(*head_price, 90.0);
            assert_eq!(*right_shoulder_price, 94.5);
            assert_eq!(*neckline_price, 100.0);
            assert_eq!(*breakout_index, Some(33));
            assert_eq!(*breakout_price, Some(101.0));
        }
        other => panic!("역헤드앤숄더여야 함: {:?}", other),
    }
}

#[test]
fn test_rejects_shoulder_mismatch() {
    // 어깨 95 / 84는 약 11.6% 차이로 허용치(10%) 초과
    let mut bars = ihs_bars();
    bars[18] = (92.0, 100.0, 80.0, 93.0);
    bars[28] = (92.0, 100.0, 84.0, 94.0);

    let candles = candles_from_ohlc(&bars);
    let scanner: HeadShouldersScanner<TestCandle> =
        HeadShouldersScanner::new(HeadShouldersConfig::default());
    assert!(scanner.scan(&candles).is_empty());
}

#[test]
fn test_rejects_head_not_lowest() {
    // 첫 골이 가장 낮으면 머리가 가장자리에 놓여 패턴이 성립하지 않음
    let mut bars = ihs_bars();
    bars[8] = (92.0, 100.0, 88.0, 93.0);

    let candles = candles_from_ohlc(&bars);
    let scanner: HeadShouldersScanner<TestCandle> =
        HeadShouldersScanner::new(HeadShouldersConfig::default());
    assert!(scanner.scan(&candles).is_empty());
}

#[test]
fn test_no_breakout_reported_when_close_stays_below_neckline() {
    let mut bars = ihs_bars();
    for bar in bars.iter_mut().skip(33) {
        *bar = (98.5, 100.0, 97.0, 99.0);
    }

    let candles = candles_from_ohlc(&bars);
    let scanner: HeadShouldersScanner<TestCandle> =
        HeadShouldersScanner::new(HeadShouldersConfig::default());
    let patterns = scanner.scan(&candles);
    assert_eq!(patterns.len(), 1);

    match &patterns[0] {
        Pattern::InvertedHeadAndShoulders {
            breakout_index,
            breakout_price,
            ..
        } => {
            assert_eq!(*breakout_index, None);
            assert_eq!(*breakout_price, None);
        }
        other => panic!("역헤드앤숄더여야 함: {:?}", other),
    }
}

#[test]
fn test_tiny_series_returns_empty() {
    let candles = candles_from_closes(&[1.0, 2.0, 3.0]);
    let scanner: HeadShouldersScanner<TestCandle> =
        HeadShouldersScanner::new(HeadShouldersConfig::default());
    assert!(scanner.scan(&candles).is_empty());
}
