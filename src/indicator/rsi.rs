use crate::candle_store::CandleStore;
use crate::indicator::IndicatorSeries;
use crate::indicator::ma::close_prices;
use crate::model::Candle;
use std::marker::PhantomData;

/// 상대강도지수(RSI) 계산 빌더
///
/// 후행 `period`개 봉간 변화량의 단순 평균 이익/손실 비율로 계산합니다
/// (Wilder 지수 평활이 아닌 단순 평균). 평균 손실이 정확히 0이면 100,
/// 처음 `period`개 위치는 `None`입니다.
#[derive(Debug)]
pub struct RsiBuilder<C: Candle> {
    /// RSI 계산 기간
    period: usize,
    _phantom: PhantomData<C>,
}

/// 종가 배열에 대한 RSI 계산 함수
fn calculate_rsi(closes: &[f64], period: usize) -> IndicatorSeries {
    // changes[k] = closes[k+1] - closes[k]
    let changes: Vec<f64> = closes.windows(2).map(|pair| pair[1] - pair[0]).collect();

    let mut rsi = Vec::with_capacity(closes.len());
    for i in 0..closes.len() {
        if i < period {
            rsi.push(None);
            continue;
        }

        let recent = &changes[i - period..i];
        let gain_sum: f64 = recent.iter().filter(|change| **change > 0.0).sum();
        let loss_sum: f64 = recent
            .iter()
            .filter(|change| **change < 0.0)
            .map(|change| change.abs())
            .sum();

        // 이익/손실 합을 건수가 아닌 period로 나눈다
        let avg_gain = gain_sum / period as f64;
        let avg_loss = loss_sum / period as f64;

        if avg_loss == 0.0 {
            rsi.push(Some(100.0));
        } else {
            let rs = avg_gain / avg_loss;
            rsi.push(Some(100.0 - (100.0 / (1.0 + rs))));
        }
    }
    rsi
}

impl<C> RsiBuilder<C>
where
    C: Candle,
{
    /// 새 RSI 빌더 생성
    ///
    /// # Arguments
    /// * `period` - RSI 계산 기간
    ///
    /// # Panics
    /// * 기간이 0이면 패닉 발생
    pub fn new(period: usize) -> Self {
        if period == 0 {
            panic!("RSI 기간은 0보다 커야 합니다");
        }

        RsiBuilder {
            period,
            _phantom: PhantomData,
        }
    }

    /// 저장소 전체 시계열에 대해 RSI 계산
    ///
    /// # Arguments
    /// * `store` - 캔들 데이터 저장소
    ///
    /// # Returns
    /// * `IndicatorSeries` - 계산된 RSI 시계열
    pub fn from_store(&self, store: &CandleStore<C>) -> IndicatorSeries {
        self.build(store.items())
    }

    /// 캔들 시계열에 대해 RSI 계산
    ///
    /// # Arguments
    /// * `data` - 캔들 시계열 (오름차순)
    ///
    /// # Returns
    /// * `IndicatorSeries` - 입력과 같은 길이의 RSI 시계열 (0~100)
    pub fn build(&self, data: &[C]) -> IndicatorSeries {
        calculate_rsi(&close_prices(data), self.period)
    }

    /// RSI 계산 기간 반환
    pub fn period(&self) -> usize {
        self.period
    }
}
