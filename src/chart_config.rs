use crate::config_loader::{ConfigResult, ConfigValidation};
use crate::indicator::IndicatorConfig;
use crate::pattern::{CupHandleConfig, HeadShouldersConfig};
use crate::signal::SignalConfig;
use crate::simulate::SimulatorConfig;
use serde::{Deserialize, Serialize};

/// 차트 엔진 통합 설정
///
/// 각 분석 컴포넌트의 설정을 한 파일에서 로드합니다. 모든 섹션은
/// 생략 가능하며 생략 시 기본값이 적용됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// 기술적 지표 설정
    pub indicator: IndicatorConfig,
    /// 스윙 신호 탐지 설정
    pub signal: SignalConfig,
    /// 컵앤핸들 스캐너 설정
    pub cup_handle: CupHandleConfig,
    /// 역헤드앤숄더 스캐너 설정
    pub head_shoulders: HeadShouldersConfig,
    /// 옵션 트레이드 시뮬레이터 설정
    pub simulator: SimulatorConfig,
}

impl ConfigValidation for ChartConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.indicator.validate()?;
        self.signal.validate()?;
        self.cup_handle.validate()?;
        self.head_shoulders.validate()?;
        self.simulator.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_loader::{ConfigFormat, ConfigLoader};

    #[test]
    fn test_default_config_is_valid() {
        assert!(ChartConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
            [signal]
            look_around = 2
            min_distance = 5
        "#;
        let config =
            ConfigLoader::load_from_string::<ChartConfig>(toml_str, ConfigFormat::Toml).unwrap();
        assert_eq!(config.signal.look_around, 2);
        assert_eq!(config.signal.min_distance, 5);
        // 나머지 섹션은 기본값
        assert_eq!(config.indicator.rsi_period, 14);
        assert_eq!(config.simulator.strike_step, 50.0);
    }

    #[test]
    fn test_invalid_section_rejected() {
        let toml_str = r#"
            [indicator]
            macd_fast = 26
            macd_slow = 12
        "#;
        let result = ConfigLoader::load_from_string::<ChartConfig>(toml_str, ConfigFormat::Toml);
        assert!(result.is_err());
    }
}
