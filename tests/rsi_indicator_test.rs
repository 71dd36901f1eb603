use common_test_utils::*;

use chart_engine::indicator::rsi::RsiBuilder;

#[test]
fn test_rsi_warmup_count() {
    let closes: Vec<f64> = (1..=20).map(|i| (i % 5) as f64 + 10.0).collect();
    let period = 14;
    let rsi = RsiBuilder::new(period).build(&candles_from_closes(&closes));

    assert_eq!(rsi.len(), closes.len());
    // 처음 period개 위치는 미정의
    assert_eq!(rsi.iter().take_while(|v| v.is_none()).count(), period);
    assert!(rsi.iter().skip(period).all(|v| v.is_some()));
}

#[test]
fn test_rsi_range() {
    let closes = [
        44.0, 44.3, 44.1, 43.6, 44.3, 44.8, 45.1, 45.4, 45.8, 46.0, 45.9, 46.3, 46.2, 46.0, 46.6,
        46.2, 46.4, 46.2, 45.6, 46.3, 46.2,
    ];
    let rsi = RsiBuilder::new(14).build(&candles_from_closes(&closes));

    for value in rsi.iter().flatten() {
        assert!((0.0..=100.0).contains(value), "RSI 범위 초과: {}", value);
    }
}

#[test]
fn test_rsi_is_100_when_no_losses() {
    // 단조 상승: 평균 손실이 정확히 0
    let closes: Vec<f64> = (1..=20).map(|i| i as f64).collect();
    let rsi = RsiBuilder::new(14).build(&candles_from_closes(&closes));

    for value in rsi.iter().flatten() {
        assert_eq!(*value, 100.0);
    }
}

#[test]
fn test_rsi_not_100_with_any_loss() {
    let mut closes: Vec<f64> = (1..=20).map(|i| i as f64).collect();
    closes[16] = 10.0; // 하락 구간 하나 삽입

    let rsi = RsiBuilder::new(14).build(&candles_from_closes(&closes));
    // 인덱스 17 시점의 창은 16번 하락을 포함
    assert!(rsi[17].unwrap() < 100.0);
}

#[test]
fn test_rsi_short_series_all_undefined() {
    let closes = [1.0, 2.0, 3.0];
    let rsi = RsiBuilder::new(14).build(&candles_from_closes(&closes));

    assert_eq!(rsi, vec![None, None, None]);
}
