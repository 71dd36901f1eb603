// 기술적 지표 모듈
// 전체 캔들 시계열에 대한 지표 계산을 제공합니다.

pub mod bband;
pub mod ma;
pub mod macd;
pub mod rsi;

use crate::config_loader::{ConfigError, ConfigResult, ConfigValidation};
use serde::{Deserialize, Serialize};

/// 캔들 시계열과 평행한 지표 시계열
///
/// 입력 시계열과 항상 같은 길이를 가지며, 워밍업 구간처럼 값이 정의되지
/// 않는 위치는 `None`으로 표현됩니다.
pub type IndicatorSeries = Vec<Option<f64>>;

/// 지표 시계열에서 표시 구간만 잘라냅니다.
///
/// 지표는 반드시 전체 시계열에 대해 계산한 뒤 이 함수로 잘라야 합니다.
/// 보이는 구간만으로 재계산하면 워밍업 구간이 잘려 나가 화면 이동 시
/// 지표 값이 불연속적으로 튀게 됩니다.
///
/// # Arguments
/// * `series` - 전체 시계열에 대해 계산된 지표
/// * `start` - 표시 구간 시작 인덱스
/// * `count` - 표시할 캔들 수
///
/// # Returns
/// * `&[Option<f64>]` - 표시 구간 슬라이스 (범위를 벗어나면 빈 슬라이스)
pub fn slice_visible(series: &[Option<f64>], start: usize, count: usize) -> &[Option<f64>] {
    if start >= series.len() {
        return &[];
    }
    let end = (start + count).min(series.len());
    &series[start..end]
}

/// 지표 계산에 사용하는 파라미터 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// 단순이동평균 기간 목록
    pub sma_periods: Vec<usize>,
    /// 지수이동평균 기간 목록
    pub ema_periods: Vec<usize>,
    /// 볼린저 밴드 기간
    pub bband_period: usize,
    /// 볼린저 밴드 표준편차 배수
    pub bband_multiplier: f64,
    /// RSI 기간
    pub rsi_period: usize,
    /// MACD 단기 EMA 기간
    pub macd_fast: usize,
    /// MACD 장기 EMA 기간
    pub macd_slow: usize,
    /// MACD 시그널 기간
    pub macd_signal: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        IndicatorConfig {
            sma_periods: vec![20, 50],
            ema_periods: vec![20],
            bband_period: 20,
            bband_multiplier: 2.0,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

impl ConfigValidation for IndicatorConfig {
    fn validate(&self) -> ConfigResult<()> {
        let periods = self
            .sma_periods
            .iter()
            .chain(self.ema_periods.iter())
            .chain([
                &self.bband_period,
                &self.rsi_period,
                &self.macd_fast,
                &self.macd_slow,
                &self.macd_signal,
            ]);
        for period in periods {
            if *period == 0 {
                return Err(ConfigError::ValidationError(
                    "지표 기간은 0보다 커야 합니다".to_string(),
                ));
            }
        }

        if self.macd_fast >= self.macd_slow {
            return Err(ConfigError::ValidationError(format!(
                "MACD 단기 기간({})은 장기 기간({})보다 작아야 합니다",
                self.macd_fast, self.macd_slow
            )));
        }

        if self.bband_multiplier <= 0.0 {
            return Err(ConfigError::ValidationError(
                "볼린저 밴드 배수는 0보다 커야 합니다".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_visible() {
        let series = vec![None, Some(1.0), Some(2.0), Some(3.0)];
        assert_eq!(slice_visible(&series, 1, 2), &[Some(1.0), Some(2.0)]);
        assert_eq!(slice_visible(&series, 2, 10), &[Some(2.0), Some(3.0)]);
        assert!(slice_visible(&series, 10, 2).is_empty());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(IndicatorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_macd_periods() {
        let config = IndicatorConfig {
            macd_fast: 26,
            macd_slow: 12,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
