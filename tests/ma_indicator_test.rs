use common_test_utils::*;

use chart_engine::indicator::ma::{EmaBuilder, SmaBuilder};
use chart_engine::indicator::slice_visible;

#[test]
fn test_sma_example_series() {
    let candles = candles_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let sma = SmaBuilder::new(3).build(&candles);

    assert_eq!(sma, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
}

#[test]
fn test_sma_length_and_warmup_count() {
    let candles = candles_from_closes(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0]);
    let period = 4;
    let sma = SmaBuilder::new(period).build(&candles);

    assert_eq!(sma.len(), candles.len());
    assert_eq!(sma.iter().take_while(|v| v.is_none()).count(), period - 1);
    assert!(sma.iter().skip(period - 1).all(|v| v.is_some()));
}

#[test]
fn test_sma_short_series_all_undefined() {
    let candles = candles_from_closes(&[1.0, 2.0]);
    let sma = SmaBuilder::new(5).build(&candles);

    assert_eq!(sma, vec![None, None]);
}

#[test]
fn test_sma_empty_series() {
    let candles = candles_from_closes(&[]);
    let sma = SmaBuilder::new(3).build(&candles);
    assert!(sma.is_empty());
}

#[test]
fn test_ema_seed_equals_sma() {
    let closes = [3.0, 7.0, 4.0, 9.0, 6.0, 8.0, 5.0, 10.0];
    let candles = candles_from_closes(&closes);
    let period = 4;

    let sma = SmaBuilder::new(period).build(&candles);
    let ema = EmaBuilder::new(period).build(&candles);

    assert_eq!(ema.len(), candles.len());
    assert_eq!(ema.iter().take_while(|v| v.is_none()).count(), period - 1);
    // 시드 값은 같은 위치의 SMA와 동일
    assert_eq!(ema[period - 1], sma[period - 1]);
}

#[test]
fn test_ema_recurrence() {
    let candles = candles_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let ema = EmaBuilder::new(3).build(&candles);

    // 시드 = SMA(3) = 2, 배수 = 0.5
    // ema[3] = (4 - 2) * 0.5 + 2 = 3, ema[4] = (5 - 3) * 0.5 + 3 = 4
    assert_eq!(ema, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
}

#[test]
fn test_indicators_are_idempotent() {
    let candles = candles_from_closes(&[5.0, 3.0, 8.0, 2.0, 9.0, 4.0, 7.0]);
    let builder = EmaBuilder::new(3);

    assert_eq!(builder.build(&candles), builder.build(&candles));
}

#[test]
fn test_full_then_slice_matches_full_computation() {
    let closes: Vec<f64> = (1..=30).map(|i| i as f64).collect();
    let candles = candles_from_closes(&closes);
    let sma = SmaBuilder::new(5).build(&candles);

    // 표시 구간 슬라이스는 전체 계산 결과의 부분이어야 함
    let visible = slice_visible(&sma, 10, 10);
    assert_eq!(visible, &sma[10..20]);
}

#[test]
#[should_panic(expected = "SMA 기간은 0보다 커야 합니다")]
fn test_sma_invalid_period() {
    SmaBuilder::<TestCandle>::new(0);
}

#[test]
#[should_panic(expected = "EMA 기간은 0보다 커야 합니다")]
fn test_ema_invalid_period() {
    EmaBuilder::<TestCandle>::new(0);
}
