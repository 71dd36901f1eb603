use common_test_utils::*;

use chart_engine::indicator::ma::EmaBuilder;
use chart_engine::indicator::macd::MacdBuilder;

fn sample_closes(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.1)
        .collect()
}

#[test]
fn test_macd_line_is_ema_difference() {
    let candles = candles_from_closes(&sample_closes(30));
    let macd = MacdBuilder::new(3, 5, 3).build(&candles);

    let fast = EmaBuilder::new(3).build(&candles);
    let slow = EmaBuilder::new(5).build(&candles);

    assert_eq!(macd.macd_line.len(), candles.len());
    for i in 0..candles.len() {
        match (fast[i], slow[i]) {
            (Some(f), Some(s)) => assert_eq!(macd.macd_line[i], Some(f - s)),
            _ => assert_eq!(macd.macd_line[i], None),
        }
    }
}

#[test]
fn test_macd_warmup_boundaries() {
    let candles = candles_from_closes(&sample_closes(30));
    let (fast, slow, signal) = (3usize, 5usize, 3usize);
    let macd = MacdBuilder::new(fast, slow, signal).build(&candles);

    // MACD 선은 장기 EMA가 정의되는 slow-1부터
    assert_eq!(
        macd.macd_line.iter().take_while(|v| v.is_none()).count(),
        slow - 1
    );
    // 시그널 선은 slow + signal - 2부터
    let seed_index = slow + signal - 2;
    assert_eq!(
        macd.signal_line.iter().take_while(|v| v.is_none()).count(),
        seed_index
    );
    assert!(macd.signal_line[seed_index].is_some());
}

#[test]
fn test_macd_histogram_propagates_undefined() {
    let candles = candles_from_closes(&sample_closes(30));
    let macd = MacdBuilder::new(3, 5, 3).build(&candles);

    for i in 0..candles.len() {
        match (macd.macd_line[i], macd.signal_line[i]) {
            (Some(m), Some(s)) => assert_eq!(macd.histogram[i], Some(m - s)),
            _ => assert_eq!(macd.histogram[i], None),
        }
    }
}

#[test]
fn test_macd_signal_seed_is_mean_of_first_run() {
    let candles = candles_from_closes(&sample_closes(30));
    let (fast, slow, signal) = (3usize, 5usize, 3usize);
    let macd = MacdBuilder::new(fast, slow, signal).build(&candles);

    let seed_index = slow + signal - 2;
    let window: Vec<f64> = macd.macd_line[seed_index + 1 - signal..=seed_index]
        .iter()
        .flatten()
        .copied()
        .collect();
    let expected = window.iter().sum::<f64>() / signal as f64;

    assert_approx(macd.signal_line[seed_index].unwrap(), expected, 1e-12);
}

#[test]
fn test_macd_short_series_all_undefined() {
    let candles = candles_from_closes(&[1.0, 2.0, 3.0]);
    let macd = MacdBuilder::new(3, 5, 3).build(&candles);

    assert!(macd.macd_line.iter().all(|v| v.is_none()));
    assert!(macd.signal_line.iter().all(|v| v.is_none()));
    assert!(macd.histogram.iter().all(|v| v.is_none()));
}

#[test]
#[should_panic(expected = "MACD 단기 기간은 장기 기간보다 작아야 합니다")]
fn test_macd_invalid_periods() {
    MacdBuilder::<TestCandle>::new(26, 12, 9);
}
