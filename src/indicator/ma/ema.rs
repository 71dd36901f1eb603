use crate::candle_store::CandleStore;
use crate::indicator::IndicatorSeries;
use crate::indicator::ma::close_prices;
use crate::model::Candle;
use std::marker::PhantomData;

/// 지수이동평균(EMA) 계산 빌더
///
/// 시드 값은 `period - 1` 위치의 SMA이며, 이후
/// `ema[i] = (close[i] - ema[i-1]) * 2/(period+1) + ema[i-1]`로 계산합니다.
/// 시드 이전 위치는 `None`입니다.
#[derive(Debug)]
pub struct EmaBuilder<C: Candle> {
    /// EMA 계산 기간
    period: usize,
    _phantom: PhantomData<C>,
}

/// 종가 배열에 대한 EMA 계산 함수
pub(crate) fn calculate_ema(closes: &[f64], period: usize) -> IndicatorSeries {
    let mut ema = Vec::with_capacity(closes.len());
    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut previous: Option<f64> = None;

    for i in 0..closes.len() {
        if i + 1 < period {
            ema.push(None);
        } else if i + 1 == period {
            // 시드: 첫 period개 종가의 단순 평균
            let seed = closes[..period].iter().sum::<f64>() / period as f64;
            previous = Some(seed);
            ema.push(previous);
        } else {
            let prev = previous.unwrap_or(closes[i]);
            let current = (closes[i] - prev) * multiplier + prev;
            previous = Some(current);
            ema.push(previous);
        }
    }
    ema
}

impl<C> EmaBuilder<C>
where
    C: Candle,
{
    /// 새 EMA 빌더 생성
    ///
    /// # Arguments
    /// * `period` - EMA 계산 기간
    ///
    /// # Panics
    /// * 기간이 0이면 패닉 발생
    pub fn new(period: usize) -> Self {
        if period == 0 {
            panic!("EMA 기간은 0보다 커야 합니다");
        }

        EmaBuilder {
            period,
            _phantom: PhantomData,
        }
    }

    /// 저장소 전체 시계열에 대해 EMA 계산
    ///
    /// # Arguments
    /// * `store` - 캔들 데이터 저장소
    ///
    /// # Returns
    /// * `IndicatorSeries` - 계산된 EMA 시계열
    pub fn from_store(&self, store: &CandleStore<C>) -> IndicatorSeries {
        self.build(store.items())
    }

    /// 캔들 시계열에 대해 EMA 계산
    ///
    /// # Arguments
    /// * `data` - 캔들 시계열 (오름차순)
    ///
    /// # Returns
    /// * `IndicatorSeries` - 입력과 같은 길이의 EMA 시계열
    pub fn build(&self, data: &[C]) -> IndicatorSeries {
        calculate_ema(&close_prices(data), self.period)
    }

    /// EMA 계산 기간 반환
    pub fn period(&self) -> usize {
        self.period
    }
}
