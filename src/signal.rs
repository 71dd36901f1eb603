use crate::candle_store::CandleStore;
use crate::config_loader::{ConfigError, ConfigResult, ConfigValidation};
use crate::model::{Candle, Signal, SignalType};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// 신호 탐지 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// 극점 확인을 위한 좌우 탐색 폭
    pub look_around: usize,
    /// 연속 신호 사이의 최소 캔들 간격
    pub min_distance: usize,
}

impl Default for SignalConfig {
    fn default() -> Self {
        SignalConfig {
            look_around: 3,
            min_distance: 10,
        }
    }
}

impl ConfigValidation for SignalConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.look_around == 0 {
            return Err(ConfigError::ValidationError(
                "look_around는 0보다 커야 합니다".to_string(),
            ));
        }
        Ok(())
    }
}

/// 스윙 저점/고점 기반 교대 신호 탐지기
///
/// 전체 캔들 시계열을 왼쪽에서 오른쪽으로 한 번 훑으며, BUY와 SELL이
/// 엄격히 교대하고 `min_distance` 이상 떨어진 신호 목록을 생성합니다.
/// 동률일 때는 먼저 나온 인덱스가 채택되며 재평가는 없습니다.
#[derive(Debug)]
pub struct SignalDetector<C: Candle> {
    config: SignalConfig,
    _phantom: PhantomData<C>,
}

impl<C> SignalDetector<C>
where
    C: Candle,
{
    /// 새 신호 탐지기 생성
    ///
    /// # Arguments
    /// * `config` - 신호 탐지 설정
    pub fn new(config: SignalConfig) -> Self {
        SignalDetector {
            config,
            _phantom: PhantomData,
        }
    }

    /// 저장소 전체 시계열에 대해 신호 탐지
    pub fn from_store(&self, store: &CandleStore<C>) -> Vec<Signal> {
        self.detect(store.items())
    }

    /// 캔들 시계열에서 교대 신호 목록 생성
    ///
    /// # Arguments
    /// * `data` - 캔들 시계열 (오름차순)
    ///
    /// # Returns
    /// * `Vec<Signal>` - BUY/SELL이 교대하는 신호 목록
    pub fn detect(&self, data: &[C]) -> Vec<Signal> {
        let look = self.config.look_around;
        if data.len() < 2 * look + 1 {
            log::trace!("신호 탐지 생략: 시계열이 너무 짧음 ({}개)", data.len());
            return Vec::new();
        }

        let mut signals: Vec<Signal> = Vec::new();

        for i in look..data.len() - look {
            let is_buy = self.is_swing_low(data, i);
            // SELL 후보는 음봉에서만 유효
            let is_sell = self.is_swing_high(data, i) && data[i].is_bearish();

            let last = signals.last();
            let far_enough = last
                .map(|signal| i - signal.index >= self.config.min_distance)
                .unwrap_or(true);

            if is_buy && last.map(|s| s.signal_type) != Some(SignalType::Buy) && far_enough {
                signals.push(Signal {
                    index: i,
                    signal_type: SignalType::Buy,
                    price: data[i].low_price(),
                    datetime: data[i].datetime(),
                });
            } else if is_sell && last.map(|s| s.signal_type) != Some(SignalType::Sell) && far_enough
            {
                signals.push(Signal {
                    index: i,
                    signal_type: SignalType::Sell,
                    price: data[i].high_price(),
                    datetime: data[i].datetime(),
                });
            }
        }

        log::debug!("신호 {}개 탐지 (전체 {}개 캔들)", signals.len(), data.len());
        signals
    }

    /// 스윙 저점 여부 확인
    ///
    /// `i`의 저가가 `[i-look, i+look]` 구간의 최솟값이고 바로 옆 캔들이
    /// 이를 깨지 않아야 합니다.
    fn is_swing_low(&self, data: &[C], i: usize) -> bool {
        let look = self.config.look_around;
        let low = data[i].low_price();

        let window_min = data[i - look..=i + look]
            .iter()
            .map(|candle| candle.low_price())
            .fold(f64::INFINITY, f64::min);

        low <= window_min && data[i - 1].low_price() >= low && data[i + 1].low_price() >= low
    }

    /// 스윙 고점 여부 확인 (저점 대칭)
    fn is_swing_high(&self, data: &[C], i: usize) -> bool {
        let look = self.config.look_around;
        let high = data[i].high_price();

        let window_max = data[i - look..=i + look]
            .iter()
            .map(|candle| candle.high_price())
            .fold(f64::NEG_INFINITY, f64::max);

        high >= window_max && data[i - 1].high_price() <= high && data[i + 1].high_price() <= high
    }
}
