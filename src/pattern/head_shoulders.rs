use crate::candle_store::CandleStore;
use crate::config_loader::{ConfigError, ConfigResult, ConfigValidation};
use crate::model::Candle;
use crate::pattern::{Pattern, find_breakout, highest_high};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// 역헤드앤숄더 스캐너가 동작하는 최소 시계열 길이
const MIN_SERIES_LEN: usize = 10;

/// 역헤드앤숄더 스캐너 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadShouldersConfig {
    /// 탐색 구간 길이
    pub lookback: usize,
    /// 양쪽 어깨 가격 차이 허용 비율
    pub shoulder_tolerance: f64,
    /// 돌파 탐색 구간 길이
    pub breakout_window: usize,
}

impl Default for HeadShouldersConfig {
    fn default() -> Self {
        HeadShouldersConfig {
            lookback: 60,
            shoulder_tolerance: 0.10,
            breakout_window: 20,
        }
    }
}

impl ConfigValidation for HeadShouldersConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.lookback < MIN_SERIES_LEN {
            return Err(ConfigError::ValidationError(format!(
                "lookback은 {} 이상이어야 합니다",
                MIN_SERIES_LEN
            )));
        }
        Ok(())
    }
}

/// 역헤드앤숄더 패턴 스캐너
///
/// 제한된 구간 안에서 국소 저점(골)을 찾아 가장 낮은 골을 머리로,
/// 양옆에서 가장 가까운 골을 어깨로 삼습니다. 머리가 양쪽 어깨보다
/// 엄격히 낮고 어깨 가격이 허용 비율 이내여야 합니다.
#[derive(Debug)]
pub struct HeadShouldersScanner<C: Candle> {
    config: HeadShouldersConfig,
    _phantom: PhantomData<C>,
}

impl<C> HeadShouldersScanner<C>
where
    C: Candle,
{
    /// 새 스캐너 생성
    ///
    /// # Arguments
    /// * `config` - 스캐너 설정
    pub fn new(config: HeadShouldersConfig) -> Self {
        HeadShouldersScanner {
            config,
            _phantom: PhantomData,
        }
    }

    /// 저장소 전체 시계열에 대해 패턴 스캔
    pub fn from_store(&self, store: &CandleStore<C>) -> Vec<Pattern> {
        self.scan(store.items())
    }

    /// 캔들 시계열에서 역헤드앤숄더 패턴 목록 생성
    ///
    /// `lookback` 길이의 구간을 절반씩 겹치며 이동시키고, 구간별로
    /// 최대 하나의 패턴을 찾습니다. 머리 인덱스가 같은 중복 매치는
    /// 하나만 보고됩니다.
    ///
    /// # Arguments
    /// * `data` - 캔들 시계열 (오름차순)
    ///
    /// # Returns
    /// * `Vec<Pattern>` - 발견된 패턴 (없으면 빈 목록)
    pub fn scan(&self, data: &[C]) -> Vec<Pattern> {
        let cfg = &self.config;
        let mut patterns = Vec::new();

        if data.len() < MIN_SERIES_LEN {
            log::trace!(
                "역헤드앤숄더 스캔 생략: 시계열이 너무 짧음 ({}개)",
                data.len()
            );
            return patterns;
        }

        let window_len = cfg.lookback.min(data.len());
        let step = (window_len / 2).max(1);
        let mut matched_heads: Vec<usize> = Vec::new();

        let mut window_start = 0;
        loop {
            let window_end = (window_start + window_len).min(data.len());
            if let Some(pattern) = self.scan_window(data, window_start, window_end) {
                if let Pattern::InvertedHeadAndShoulders { head_index, .. } = &pattern {
                    if !matched_heads.contains(head_index) {
                        matched_heads.push(*head_index);
                        patterns.push(pattern);
                    }
                }
            }

            if window_end == data.len() {
                break;
            }
            window_start += step;
        }

        patterns
    }

    /// 단일 구간에서 패턴 탐색
    fn scan_window(&self, data: &[C], start: usize, end: usize) -> Option<Pattern> {
        let troughs = find_troughs(data, start, end);
        if troughs.len() < 3 {
            return None;
        }

        // 가장 낮은 골이 머리
        let head_position = troughs
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.1.total_cmp(&b.1))
            .map(|(position, _)| position)?;
        if head_position == 0 || head_position == troughs.len() - 1 {
            return None;
        }

        let (left_shoulder_index, left_shoulder_price) = troughs[head_position - 1];
        let (head_index, head_price) = troughs[head_position];
        let (right_shoulder_index, right_shoulder_price) = troughs[head_position + 1];

        // 머리는 양쪽 어깨보다 엄격히 낮아야 함
        if head_price >= left_shoulder_price || head_price >= right_shoulder_price {
            return None;
        }

        let higher_shoulder = left_shoulder_price.max(right_shoulder_price);
        if higher_shoulder <= 0.0 {
            return None;
        }
        let shoulder_gap = (left_shoulder_price - right_shoulder_price).abs() / higher_shoulder;
        if shoulder_gap > self.config.shoulder_tolerance {
            return None;
        }

        let neckline_price = self.neckline(
            data,
            left_shoulder_index,
            right_shoulder_index,
            left_shoulder_price,
            right_shoulder_price,
        )?;

        let breakout = find_breakout(
            data,
            right_shoulder_index + 1,
            right_shoulder_index + 1 + self.config.breakout_window,
            neckline_price,
        );

        log::debug!(
            "역헤드앤숄더 발견: 어깨 {:.2}/{:.2}, 머리 {:.2}, 넥라인 {:.2}",
            left_shoulder_price,
            right_shoulder_price,
            head_price,
            neckline_price
        );

        Some(Pattern::InvertedHeadAndShoulders {
            left_shoulder_index,
            head_index,
            right_shoulder_index,
            neckline_price,
            left_shoulder_price,
            head_price,
            right_shoulder_price,
            breakout_index: breakout.map(|(index, _)| index),
            breakout_price: breakout.map(|(_, price)| price),
        })
    }

    /// 넥라인 가격 계산
    ///
    /// 어깨 사이 구간에서 양쪽 어깨 가격을 모두 넘는 고가들의 평균,
    /// 없으면 구간 내 최대 고가로 대체합니다.
    fn neckline(
        &self,
        data: &[C],
        left_shoulder_index: usize,
        right_shoulder_index: usize,
        left_shoulder_price: f64,
        right_shoulder_price: f64,
    ) -> Option<f64> {
        let span = data.get(left_shoulder_index + 1..right_shoulder_index)?;
        let above: Vec<f64> = span
            .iter()
            .map(|candle| candle.high_price())
            .filter(|high| *high > left_shoulder_price && *high > right_shoulder_price)
            .collect();

        if above.is_empty() {
            highest_high(data, left_shoulder_index + 1, right_shoulder_index)
                .map(|(_, price)| price)
        } else {
            Some(above.iter().sum::<f64>() / above.len() as f64)
        }
    }
}

/// 구간 내 국소 저점(골) 찾기
///
/// 양옆 2캔들보다 엄격히 낮은 저가를 골로 판정합니다.
fn find_troughs<C: Candle>(data: &[C], start: usize, end: usize) -> Vec<(usize, f64)> {
    let mut troughs = Vec::new();
    let from = start.max(2);
    let to = end.min(data.len()).saturating_sub(2);

    for i in from..to {
        let low = data[i].low_price();
        let is_trough = data[i - 2].low_price() > low
            && data[i - 1].low_price() > low
            && data[i + 1].low_price() > low
            && data[i + 2].low_price() > low;
        if is_trough {
            troughs.push((i, low));
        }
    }
    troughs
}
