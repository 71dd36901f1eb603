use crate::candle_store::CandleStore;
use crate::indicator::IndicatorSeries;
use crate::indicator::ma::close_prices;
use crate::indicator::ma::sma::calculate_sma;
use crate::model::Candle;
use std::marker::PhantomData;

/// 볼린저 밴드 계산 결과
///
/// 세 시계열 모두 입력 캔들 시계열과 같은 길이입니다.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    /// 상단 밴드 (중간 + 표준편차 * 배수)
    pub upper: IndicatorSeries,
    /// 중간 밴드 (SMA)
    pub middle: IndicatorSeries,
    /// 하단 밴드 (중간 - 표준편차 * 배수)
    pub lower: IndicatorSeries,
}

/// 볼린저 밴드 계산 빌더
///
/// 중간 밴드는 SMA, 밴드 폭은 같은 구간 종가의 모집단 표준편차에
/// 배수를 곱한 값입니다.
#[derive(Debug)]
pub struct BBandBuilder<C: Candle> {
    /// 이동평균/표준편차 계산 기간
    period: usize,
    /// 표준편차 배수
    multiplier: f64,
    _phantom: PhantomData<C>,
}

impl<C> BBandBuilder<C>
where
    C: Candle,
{
    /// 새 볼린저 밴드 빌더 생성
    ///
    /// # Arguments
    /// * `period` - 계산 기간
    /// * `multiplier` - 표준편차 배수
    ///
    /// # Panics
    /// * 기간이 0이면 패닉 발생
    pub fn new(period: usize, multiplier: f64) -> Self {
        if period == 0 {
            panic!("볼린저 밴드 기간은 0보다 커야 합니다");
        }

        BBandBuilder {
            period,
            multiplier,
            _phantom: PhantomData,
        }
    }

    /// 저장소 전체 시계열에 대해 볼린저 밴드 계산
    ///
    /// # Arguments
    /// * `store` - 캔들 데이터 저장소
    ///
    /// # Returns
    /// * `BollingerBands` - 계산된 밴드 시계열
    pub fn from_store(&self, store: &CandleStore<C>) -> BollingerBands {
        self.build(store.items())
    }

    /// 캔들 시계열에 대해 볼린저 밴드 계산
    ///
    /// # Arguments
    /// * `data` - 캔들 시계열 (오름차순)
    ///
    /// # Returns
    /// * `BollingerBands` - 입력과 같은 길이의 밴드 시계열
    pub fn build(&self, data: &[C]) -> BollingerBands {
        let closes = close_prices(data);
        let middle = calculate_sma(&closes, self.period);
        let mut upper = Vec::with_capacity(closes.len());
        let mut lower = Vec::with_capacity(closes.len());

        for i in 0..closes.len() {
            match middle[i] {
                None => {
                    upper.push(None);
                    lower.push(None);
                }
                Some(mean) => {
                    let window = &closes[i + 1 - self.period..=i];
                    // 모집단 표준편차 (period로 나눔)
                    let variance = window
                        .iter()
                        .map(|close| (close - mean).powi(2))
                        .sum::<f64>()
                        / self.period as f64;
                    let std_dev = variance.sqrt();

                    upper.push(Some(mean + std_dev * self.multiplier));
                    lower.push(Some(mean - std_dev * self.multiplier));
                }
            }
        }

        BollingerBands {
            upper,
            middle,
            lower,
        }
    }

    /// 계산 기간 반환
    pub fn period(&self) -> usize {
        self.period
    }
}
