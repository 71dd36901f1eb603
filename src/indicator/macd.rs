use crate::candle_store::CandleStore;
use crate::indicator::IndicatorSeries;
use crate::indicator::ma::close_prices;
use crate::indicator::ma::ema::calculate_ema;
use crate::model::Candle;
use std::marker::PhantomData;

/// MACD 계산 결과
///
/// 세 시계열 모두 입력 캔들 시계열과 같은 길이입니다. 피연산자가
/// `None`인 위치는 결과도 `None`입니다.
#[derive(Debug, Clone)]
pub struct Macd {
    /// MACD 선 (단기 EMA - 장기 EMA)
    pub macd_line: IndicatorSeries,
    /// 시그널 선 (MACD 선의 EMA 방식 평활)
    pub signal_line: IndicatorSeries,
    /// 히스토그램 (MACD 선 - 시그널 선)
    pub histogram: IndicatorSeries,
}

/// MACD 계산 빌더
///
/// 시그널 선은 정의된 MACD 값 `signal`개 구간의 단순 평균으로 시드한 뒤
/// `2/(signal+1)` 배수로 EMA 평활합니다.
#[derive(Debug)]
pub struct MacdBuilder<C: Candle> {
    /// 단기 EMA 기간
    fast_period: usize,
    /// 장기 EMA 기간
    slow_period: usize,
    /// 시그널 평활 기간
    signal_period: usize,
    _phantom: PhantomData<C>,
}

impl<C> MacdBuilder<C>
where
    C: Candle,
{
    /// 새 MACD 빌더 생성
    ///
    /// # Arguments
    /// * `fast_period` - 단기 EMA 기간
    /// * `slow_period` - 장기 EMA 기간
    /// * `signal_period` - 시그널 평활 기간
    ///
    /// # Panics
    /// * 기간이 0이거나 단기 기간이 장기 기간 이상이면 패닉 발생
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        if fast_period == 0 || slow_period == 0 || signal_period == 0 {
            panic!("MACD 기간은 0보다 커야 합니다");
        }
        if fast_period >= slow_period {
            panic!("MACD 단기 기간은 장기 기간보다 작아야 합니다");
        }

        MacdBuilder {
            fast_period,
            slow_period,
            signal_period,
            _phantom: PhantomData,
        }
    }

    /// 저장소 전체 시계열에 대해 MACD 계산
    ///
    /// # Arguments
    /// * `store` - 캔들 데이터 저장소
    ///
    /// # Returns
    /// * `Macd` - 계산된 MACD 시계열
    pub fn from_store(&self, store: &CandleStore<C>) -> Macd {
        self.build(store.items())
    }

    /// 캔들 시계열에 대해 MACD 계산
    ///
    /// # Arguments
    /// * `data` - 캔들 시계열 (오름차순)
    ///
    /// # Returns
    /// * `Macd` - 입력과 같은 길이의 MACD/시그널/히스토그램 시계열
    pub fn build(&self, data: &[C]) -> Macd {
        let closes = close_prices(data);
        let fast_ema = calculate_ema(&closes, self.fast_period);
        let slow_ema = calculate_ema(&closes, self.slow_period);

        // 피연산자 중 하나라도 None이면 결과도 None
        let macd_line: IndicatorSeries = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(fast, slow)| match (fast, slow) {
                (Some(fast), Some(slow)) => Some(fast - slow),
                _ => None,
            })
            .collect();

        let signal_line = self.calculate_signal_line(&macd_line);

        let histogram: IndicatorSeries = macd_line
            .iter()
            .zip(signal_line.iter())
            .map(|(macd, signal)| match (macd, signal) {
                (Some(macd), Some(signal)) => Some(macd - signal),
                _ => None,
            })
            .collect();

        Macd {
            macd_line,
            signal_line,
            histogram,
        }
    }

    /// MACD 선에서 시그널 선 계산
    ///
    /// 시드 위치(`slow + signal - 2`) 이전은 None이며, 시드 값은 직전
    /// `signal`개의 정의된 MACD 값 단순 평균입니다.
    fn calculate_signal_line(&self, macd_line: &[Option<f64>]) -> IndicatorSeries {
        let multiplier = 2.0 / (self.signal_period as f64 + 1.0);
        let seed_index = self.slow_period + self.signal_period - 2;
        let mut signal_line = Vec::with_capacity(macd_line.len());
        let mut previous: Option<f64> = None;

        for i in 0..macd_line.len() {
            let Some(macd) = macd_line[i] else {
                signal_line.push(None);
                continue;
            };

            if i < seed_index {
                signal_line.push(None);
            } else if let Some(prev) = previous {
                let current = (macd - prev) * multiplier + prev;
                previous = Some(current);
                signal_line.push(previous);
            } else {
                // 시드: 직전 signal개 구간이 모두 정의된 경우에만
                let start = (i + 1).saturating_sub(self.signal_period);
                let window: Vec<f64> = macd_line[start..=i].iter().flatten().copied().collect();
                if window.len() == self.signal_period {
                    let seed = window.iter().sum::<f64>() / self.signal_period as f64;
                    previous = Some(seed);
                    signal_line.push(previous);
                } else {
                    signal_line.push(None);
                }
            }
        }

        signal_line
    }
}
