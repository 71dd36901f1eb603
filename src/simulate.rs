use crate::config_loader::{ConfigError, ConfigResult, ConfigValidation};
use crate::model::{Signal, SignalType};
use serde::{Deserialize, Serialize};

/// 트레이드 시뮬레이션 오류
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// 선택한 신호가 매수 신호가 아님
    NotABuySignal,
    /// 선택한 매수 신호 이후에 짝이 되는 매도 신호가 없음
    ///
    /// 라이브 시계열의 마지막 매수 신호에서 흔히 발생하는 정상적인
    /// 결과이며 호출자가 처리해야 합니다.
    NoPairedSignal,
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::NotABuySignal => write!(f, "매수 신호가 아닙니다"),
            SimulationError::NoPairedSignal => {
                write!(f, "짝이 되는 매도 신호가 없습니다")
            }
        }
    }
}

/// 시뮬레이션 결과
pub type SimulationResult<T> = Result<T, SimulationError>;

/// 옵션 시뮬레이션 설정
///
/// 프리미엄 계산은 변동성 입력이 없는 단순화된 휴리스틱입니다.
/// 실제 옵션 가격 모델이 아니며, 의도적으로 그대로 유지합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// 행사가 간격
    pub strike_step: f64,
    /// 1랏당 주식 수
    pub lot_size: u32,
    /// 랏 수
    pub lots: u32,
    /// 프리미엄 하한 (현물가 대비 비율)
    pub premium_floor_pct: f64,
    /// 시간 가치 (현물가 대비 비율)
    pub time_value_pct: f64,
    /// 청산 시점 시간 가치 가중치 (만기 접근 반영)
    pub exit_time_value_weight: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            strike_step: 50.0,
            lot_size: 50,
            lots: 1,
            premium_floor_pct: 0.02,
            time_value_pct: 0.04,
            exit_time_value_weight: 0.5,
        }
    }
}

impl ConfigValidation for SimulatorConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.strike_step <= 0.0 {
            return Err(ConfigError::ValidationError(
                "행사가 간격은 0보다 커야 합니다".to_string(),
            ));
        }
        if self.lot_size == 0 || self.lots == 0 {
            return Err(ConfigError::ValidationError(
                "랏 크기와 랏 수는 0보다 커야 합니다".to_string(),
            ));
        }
        Ok(())
    }
}

/// 진입 시점의 합성 옵션 계약
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryOption {
    /// 행사가 (진입 현물가를 간격 단위로 올림)
    pub strike_price: f64,
    /// 주당 프리미엄
    pub premium_per_share: f64,
    /// 1랏당 주식 수
    pub lot_size: u32,
    /// 랏 수
    pub lots: u32,
    /// 총 프리미엄 (투입 자본)
    pub total_premium: f64,
}

/// 청산 시점의 옵션 가치
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExitOption {
    /// 주당 프리미엄
    pub premium_per_share: f64,
    /// 총 가치
    pub total_value: f64,
}

/// 매수-매도 신호 쌍에 대한 시뮬레이션 트레이드
///
/// 저장되지 않는 파생 값이며, 선택한 매수 신호로부터 매번 다시
/// 계산됩니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulatedTrade {
    pub buy_signal: Signal,
    pub sell_signal: Signal,
    pub entry_option: EntryOption,
    pub exit_option: ExitOption,
    /// 손익 (청산 총 가치 - 진입 총 프리미엄)
    pub pnl: f64,
    /// 손익률 (%)
    pub pnl_percentage: f64,
}

/// 합성 옵션 트레이드 시뮬레이터
///
/// 매수 신호와 그 뒤 교대하는 매도 신호로부터 콜 옵션 계약을
/// 합성하고 손익을 계산합니다.
#[derive(Debug)]
pub struct TradeSimulator {
    config: SimulatorConfig,
}

impl TradeSimulator {
    /// 새 시뮬레이터 생성
    ///
    /// # Arguments
    /// * `config` - 시뮬레이션 설정
    pub fn new(config: SimulatorConfig) -> Self {
        TradeSimulator { config }
    }

    /// 신호 목록에서 지정한 매수 신호에 대해 시뮬레이션 실행
    ///
    /// # Arguments
    /// * `signals` - 교대 신호 목록
    /// * `buy_position` - 신호 목록 내 매수 신호 위치
    ///
    /// # Returns
    /// * `SimulationResult<SimulatedTrade>` - 트레이드 결과 또는 오류
    pub fn simulate(
        &self,
        signals: &[Signal],
        buy_position: usize,
    ) -> SimulationResult<SimulatedTrade> {
        let buy_signal = signals
            .get(buy_position)
            .filter(|signal| signal.signal_type == SignalType::Buy)
            .ok_or(SimulationError::NotABuySignal)?;

        // 매수 이후 첫 매도 신호가 짝
        let sell_signal = signals[buy_position + 1..]
            .iter()
            .find(|signal| {
                signal.signal_type == SignalType::Sell && signal.index > buy_signal.index
            })
            .ok_or(SimulationError::NoPairedSignal)?;

        Ok(self.build_trade(buy_signal.clone(), sell_signal.clone()))
    }

    /// 모든 매수 신호를 다음 매도 신호와 짝지어 시뮬레이션
    ///
    /// 짝이 없는 마지막 매수 신호는 조용히 건너뜁니다.
    ///
    /// # Arguments
    /// * `signals` - 교대 신호 목록
    ///
    /// # Returns
    /// * `Vec<SimulatedTrade>` - 완결된 트레이드 목록
    pub fn simulate_all(&self, signals: &[Signal]) -> Vec<SimulatedTrade> {
        signals
            .iter()
            .enumerate()
            .filter(|(_, signal)| signal.signal_type == SignalType::Buy)
            .filter_map(|(position, _)| self.simulate(signals, position).ok())
            .collect()
    }

    fn build_trade(&self, buy_signal: Signal, sell_signal: Signal) -> SimulatedTrade {
        let cfg = &self.config;
        let entry_spot = buy_signal.price;
        let exit_spot = sell_signal.price;

        let strike_price = (entry_spot / cfg.strike_step).ceil() * cfg.strike_step;
        let shares = (cfg.lot_size * cfg.lots) as f64;

        let entry_premium = self.premium_per_share(entry_spot, strike_price, cfg.time_value_pct);
        let total_premium = entry_premium * shares;

        // 만기에 가까워졌다는 가정으로 시간 가치 가중치 축소
        let exit_premium = self.premium_per_share(
            exit_spot,
            strike_price,
            cfg.time_value_pct * cfg.exit_time_value_weight,
        );
        let total_value = exit_premium * shares;

        let pnl = total_value - total_premium;
        let pnl_percentage = if total_premium > 0.0 {
            pnl / total_premium * 100.0
        } else {
            0.0
        };

        log::debug!(
            "트레이드 시뮬레이션: {} -> {}, 행사가 {:.2}, 손익 {:.2} ({:.2}%)",
            buy_signal,
            sell_signal,
            strike_price,
            pnl,
            pnl_percentage
        );

        SimulatedTrade {
            buy_signal,
            sell_signal,
            entry_option: EntryOption {
                strike_price,
                premium_per_share: entry_premium,
                lot_size: cfg.lot_size,
                lots: cfg.lots,
                total_premium,
            },
            exit_option: ExitOption {
                premium_per_share: exit_premium,
                total_value,
            },
            pnl,
            pnl_percentage,
        }
    }

    /// 주당 프리미엄 휴리스틱
    ///
    /// `max(내재가치, 하한 비율 * 현물가) + 시간 가치 비율 * 현물가`
    fn premium_per_share(&self, spot: f64, strike: f64, time_value_pct: f64) -> f64 {
        let intrinsic = (spot - strike).max(0.0);
        let floor = self.config.premium_floor_pct * spot;
        intrinsic.max(floor) + time_value_pct * spot
    }
}
