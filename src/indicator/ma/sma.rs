use crate::candle_store::CandleStore;
use crate::indicator::IndicatorSeries;
use crate::indicator::ma::close_prices;
use crate::model::Candle;
use std::marker::PhantomData;

/// 단순이동평균(SMA) 계산 빌더
///
/// 종가에 대한 후행 `period` 구간의 산술 평균을 계산합니다.
/// 출력은 입력과 같은 길이이며 처음 `period - 1`개 위치는 `None`입니다.
#[derive(Debug)]
pub struct SmaBuilder<C: Candle> {
    /// SMA 계산 기간
    period: usize,
    _phantom: PhantomData<C>,
}

/// 종가 배열에 대한 SMA 계산 함수
pub(crate) fn calculate_sma(closes: &[f64], period: usize) -> IndicatorSeries {
    let mut sma = Vec::with_capacity(closes.len());
    for i in 0..closes.len() {
        if i + 1 < period {
            sma.push(None);
        } else {
            let sum: f64 = closes[i + 1 - period..=i].iter().sum();
            sma.push(Some(sum / period as f64));
        }
    }
    sma
}

impl<C> SmaBuilder<C>
where
    C: Candle,
{
    /// 새 SMA 빌더 생성
    ///
    /// # Arguments
    /// * `period` - SMA 계산 기간
    ///
    /// # Panics
    /// * 기간이 0이면 패닉 발생
    pub fn new(period: usize) -> Self {
        if period == 0 {
            panic!("SMA 기간은 0보다 커야 합니다");
        }

        SmaBuilder {
            period,
            _phantom: PhantomData,
        }
    }

    /// 저장소 전체 시계열에 대해 SMA 계산
    ///
    /// # Arguments
    /// * `store` - 캔들 데이터 저장소
    ///
    /// # Returns
    /// * `IndicatorSeries` - 계산된 SMA 시계열
    pub fn from_store(&self, store: &CandleStore<C>) -> IndicatorSeries {
        self.build(store.items())
    }

    /// 캔들 시계열에 대해 SMA 계산
    ///
    /// # Arguments
    /// * `data` - 캔들 시계열 (오름차순)
    ///
    /// # Returns
    /// * `IndicatorSeries` - 입력과 같은 길이의 SMA 시계열
    pub fn build(&self, data: &[C]) -> IndicatorSeries {
        calculate_sma(&close_prices(data), self.period)
    }

    /// SMA 계산 기간 반환
    pub fn period(&self) -> usize {
        self.period
    }
}
