use crate::candle_store::CandleStore;
use crate::config_loader::{ConfigError, ConfigResult, ConfigValidation};
use crate::model::Candle;
use crate::pattern::{Pattern, find_breakout, highest_high, lowest_low};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// 컵앤핸들 스캐너 설정
///
/// 림 대칭/깊이 임계값은 원 구현에서 경험적으로 정한 상수이며
/// 재도출하지 않고 설정값으로 유지합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CupHandleConfig {
    /// 컵 탐색에 사용하는 후행 구간 길이
    pub max_cup_length: usize,
    /// 왼쪽 림 탐색 폭 (구간 앞쪽 캔들 수)
    pub rim_window: usize,
    /// 오른쪽 림 탐색 폭 (구간 뒤쪽 캔들 수)
    pub right_rim_window: usize,
    /// 양쪽 림 가격 차이 허용 비율
    pub rim_tolerance: f64,
    /// 최소 컵 깊이 비율
    pub min_cup_depth: f64,
    /// 핸들 구간 길이
    pub handle_length: usize,
    /// 핸들 눌림 최소 깊이 비율
    pub min_handle_depth: f64,
    /// 핸들 눌림 최대 깊이 비율
    pub max_handle_depth: f64,
    /// 돌파 탐색 구간 길이
    pub breakout_window: usize,
}

impl Default for CupHandleConfig {
    fn default() -> Self {
        CupHandleConfig {
            max_cup_length: 40,
            rim_window: 10,
            right_rim_window: 15,
            rim_tolerance: 0.05,
            min_cup_depth: 0.10,
            handle_length: 10,
            min_handle_depth: 0.03,
            max_handle_depth: 0.15,
            breakout_window: 20,
        }
    }
}

impl ConfigValidation for CupHandleConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.rim_window + self.right_rim_window >= self.max_cup_length {
            return Err(ConfigError::ValidationError(format!(
                "림 탐색 폭 합({} + {})은 컵 구간 길이({})보다 작아야 합니다",
                self.rim_window, self.right_rim_window, self.max_cup_length
            )));
        }
        if self.min_handle_depth > self.max_handle_depth {
            return Err(ConfigError::ValidationError(
                "핸들 최소 깊이가 최대 깊이보다 큽니다".to_string(),
            ));
        }
        Ok(())
    }
}

/// 컵앤핸들 패턴 스캐너
///
/// 각 위치의 후행 구간에서 왼쪽 림 / 컵 바닥 / 오른쪽 림을 찾고
/// 림 대칭, 컵 깊이, 핸들 눌림 조건을 검사합니다. 증분 계산 없이
/// 시계열이 바뀔 때마다 전체를 다시 훑습니다.
#[derive(Debug)]
pub struct CupHandleScanner<C: Candle> {
    config: CupHandleConfig,
    _phantom: PhantomData<C>,
}

impl<C> CupHandleScanner<C>
where
    C: Candle,
{
    /// 새 스캐너 생성
    ///
    /// # Arguments
    /// * `config` - 스캐너 설정
    pub fn new(config: CupHandleConfig) -> Self {
        CupHandleScanner {
            config,
            _phantom: PhantomData,
        }
    }

    /// 저장소 전체 시계열에 대해 패턴 스캔
    pub fn from_store(&self, store: &CandleStore<C>) -> Vec<Pattern> {
        self.scan(store.items())
    }

    /// 캔들 시계열에서 컵앤핸들 패턴 목록 생성
    ///
    /// # Arguments
    /// * `data` - 캔들 시계열 (오름차순)
    ///
    /// # Returns
    /// * `Vec<Pattern>` - 발견된 패턴 (없으면 빈 목록)
    pub fn scan(&self, data: &[C]) -> Vec<Pattern> {
        let cfg = &self.config;
        let mut patterns = Vec::new();

        if data.len() <= cfg.max_cup_length {
            log::trace!("컵앤핸들 스캔 생략: 시계열이 너무 짧음 ({}개)", data.len());
            return patterns;
        }

        // 연속 위치가 같은 오른쪽 림을 다시 찾는 경우 중복 보고 억제
        let mut last_rim_index: Option<usize> = None;

        for i in cfg.max_cup_length..data.len() {
            let window_start = i - cfg.max_cup_length;

            let Some((left_rim_index, left_rim_price)) =
                highest_high(data, window_start, window_start + cfg.rim_window)
            else {
                continue;
            };
            let Some((right_rim_index, right_rim_price)) =
                highest_high(data, i - cfg.right_rim_window, i)
            else {
                continue;
            };
            let Some((cup_bottom_index, cup_bottom_price)) = lowest_low(
                data,
                window_start + cfg.rim_window,
                i - cfg.right_rim_window + 1,
            ) else {
                continue;
            };

            if last_rim_index == Some(right_rim_index) {
                continue;
            }

            let higher_rim = left_rim_price.max(right_rim_price);
            if higher_rim <= 0.0 {
                continue;
            }

            // 림 대칭 및 컵 깊이 검사
            let rim_gap = (left_rim_price - right_rim_price).abs() / higher_rim;
            if rim_gap > cfg.rim_tolerance {
                continue;
            }
            let cup_depth = (higher_rim - cup_bottom_price) / higher_rim;
            if cup_depth < cfg.min_cup_depth {
                continue;
            }

            // 핸들: 오른쪽 림 직후 고정 길이 구간의 눌림 깊이 검사
            let handle_start_index = right_rim_index + 1;
            let handle_end_index = right_rim_index + cfg.handle_length;
            if handle_end_index >= data.len() {
                continue;
            }
            let Some((_, handle_low_price)) =
                lowest_low(data, handle_start_index, handle_end_index + 1)
            else {
                continue;
            };
            let handle_depth = (right_rim_price - handle_low_price) / right_rim_price;
            if handle_depth < cfg.min_handle_depth || handle_depth > cfg.max_handle_depth {
                continue;
            }

            let breakout = find_breakout(
                data,
                handle_end_index + 1,
                handle_end_index + 1 + cfg.breakout_window,
                right_rim_price,
            );

            log::debug!(
                "컵앤핸들 발견: 림 {:.2}/{:.2}, 바닥 {:.2}, 핸들 저가 {:.2}",
                left_rim_price,
                right_rim_price,
                cup_bottom_price,
                handle_low_price
            );

            patterns.push(Pattern::CupAndHandle {
                cup_start_index: left_rim_index,
                cup_bottom_index,
                cup_end_index: right_rim_index,
                handle_start_index,
                handle_end_index,
                left_rim_price,
                right_rim_price,
                cup_bottom_price,
                handle_low_price,
                breakout_index: breakout.map(|(index, _)| index),
                breakout_price: breakout.map(|(_, price)| price),
            });
            last_rim_index = Some(right_rim_index);
        }

        patterns
    }
}
