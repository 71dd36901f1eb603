use crate::model::{Candle, Timeframe};
use chrono::{DateTime, Duration, Utc};

/// 하나의 종목/시간 단위 쌍에 대한 캔들 시계열 저장소
///
/// 캔들은 시각 기준 오름차순으로, 중복 없는 타임스탬프로 유지됩니다.
/// 저장소는 차트 세션이 단독으로 소유하며, 주기적 라이브 갱신은
/// `reconcile` 경로를 통해서만 반영됩니다.
pub struct CandleStore<C: Candle> {
    items: Vec<C>,
    timeframe: Timeframe,
}

/// 타임스탬프 기준 오름차순 정렬 후 중복 제거
///
/// # Arguments
/// * `items` - 정렬할 캔들 목록
fn sort_and_dedup<C: Candle>(items: &mut Vec<C>) {
    items.sort_by_key(|item| item.datetime());
    items.dedup_by_key(|item| item.datetime());
}

impl<C> CandleStore<C>
where
    C: Candle,
{
    /// 새로운 CandleStore 인스턴스를 생성합니다.
    ///
    /// 초기 목록은 오름차순으로 정렬되고 동일 타임스탬프는 제거됩니다.
    ///
    /// # Arguments
    /// * `items` - 초기 캔들 목록
    /// * `timeframe` - 캔들 시간 단위
    ///
    /// # Returns
    /// * `CandleStore<C>` - 생성된 저장소 인스턴스
    pub fn new(mut items: Vec<C>, timeframe: Timeframe) -> CandleStore<C> {
        sort_and_dedup(&mut items);
        CandleStore { items, timeframe }
    }

    /// 새 캔들을 꼬리에 추가합니다.
    ///
    /// 마지막 캔들보다 늦은 타임스탬프만 허용됩니다. 단조성을 위반하는
    /// 캔들은 경고 로그 후 무시됩니다.
    ///
    /// # Arguments
    /// * `candle` - 추가할 캔들
    pub fn append(&mut self, candle: C) {
        if let Some(last) = self.items.last() {
            if candle.datetime() <= last.datetime() {
                log::warn!(
                    "append 거부: 타임스탬프가 단조 증가하지 않음 (last={}, new={})",
                    last.datetime(),
                    candle.datetime()
                );
                return;
            }
        }
        self.items.push(candle);
    }

    /// 마지막 캔들을 덮어씁니다.
    ///
    /// 아직 완성되지 않은(형성 중인) 캔들이 갱신될 때 사용됩니다.
    /// 빈 저장소에서는 경고 로그 후 무시됩니다.
    ///
    /// # Arguments
    /// * `candle` - 교체할 캔들
    pub fn replace_last(&mut self, candle: C) {
        match self.items.last_mut() {
            Some(last) => *last = candle,
            None => log::warn!("replace_last 무시: 저장소가 비어 있음"),
        }
    }

    /// 과거 데이터 배치를 머리에 병합합니다.
    ///
    /// 기존 캔들과 타임스탬프가 겹치는 항목은 기존 것이 유지되며,
    /// 병합 후 오름차순 정렬이 보장됩니다 (정렬되지 않은 응답 방어).
    ///
    /// # Arguments
    /// * `older` - 백필로 받은 과거 캔들 목록
    pub fn prepend(&mut self, older: Vec<C>) {
        if older.is_empty() {
            return;
        }

        // 안정 정렬: 과거 배치를 앞에 두면 동일 타임스탬프에서 기존 항목이 뒤에 온다
        let mut merged = older;
        merged.extend(self.items.drain(..));
        merged.sort_by_key(|item| item.datetime());

        // 동일 타임스탬프는 기존 항목(뒤쪽) 우선
        let mut deduped: Vec<C> = Vec::with_capacity(merged.len());
        for item in merged {
            match deduped.last_mut() {
                Some(last) if last.datetime() == item.datetime() => *last = item,
                _ => deduped.push(item),
            }
        }
        self.items = deduped;

        log::debug!("prepend 완료: 총 {}개 캔들", self.items.len());
    }

    /// 라이브 갱신 병합
    ///
    /// 새로 받은 꼬리 데이터의 마지막 캔들 타임스탬프를 저장소의 마지막
    /// 캔들과 비교하여 세 갈래로 처리합니다.
    /// - 동일: 형성 중인 캔들 갱신 (`replace_last`)
    /// - 이후: 새 캔들 시작 (`append`)
    /// - 이전: 시계 역행/재전송 이상으로 간주하고 전체 교체
    ///
    /// # Arguments
    /// * `fresh_tail` - 새로 받은 캔들 꼬리 (오름차순)
    pub fn reconcile(&mut self, fresh_tail: Vec<C>) {
        let Some(latest_new) = fresh_tail.last().cloned() else {
            log::debug!("reconcile 무시: 빈 응답");
            return;
        };

        let Some(latest_existing) = self.items.last() else {
            // 초기 로드: 받은 데이터를 그대로 채택
            self.items = fresh_tail;
            sort_and_dedup(&mut self.items);
            return;
        };

        let existing_time = latest_existing.datetime();
        let new_time = latest_new.datetime();

        if new_time == existing_time {
            log::trace!("형성 중인 캔들 갱신: {}", latest_new);
            self.replace_last(latest_new);
        } else if new_time > existing_time {
            log::trace!("새 캔들 추가: {}", latest_new);
            self.append(latest_new);
        } else {
            log::warn!(
                "reconcile 이상 감지: 수신 타임스탬프가 과거임 (existing={}, new={}), 전체 교체",
                existing_time,
                new_time
            );
            self.items = fresh_tail;
            sort_and_dedup(&mut self.items);
        }
    }

    /// 저장소에 있는 캔들 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// 저장소가 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 가장 오래된 캔들을 반환합니다.
    pub fn first(&self) -> Option<&C> {
        self.items.first()
    }

    /// 가장 최근 캔들을 반환합니다.
    pub fn last(&self) -> Option<&C> {
        self.items.last()
    }

    /// 지정된 인덱스의 캔들을 반환합니다.
    ///
    /// # Arguments
    /// * `index` - 가져올 캔들의 인덱스 (0 = 가장 오래된 캔들)
    pub fn get(&self, index: usize) -> Option<&C> {
        self.items.get(index)
    }

    /// 전체 캔들 슬라이스를 반환합니다 (오름차순).
    ///
    /// 지표/신호/패턴 계산은 항상 이 전체 슬라이스를 입력으로 받습니다.
    pub fn items(&self) -> &[C] {
        &self.items
    }

    /// 저장소의 시간 단위를 반환합니다.
    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// 다음 캔들 시작까지 남은 시간
    ///
    /// 마지막 캔들의 시작 시각 + 시간 단위 길이에서 현재 시각을 뺀
    /// 값입니다. 버킷이 이미 지났으면 음수 Duration이 반환되며,
    /// 호출자는 이를 "갱신 중" 상태로 표시합니다.
    ///
    /// # Arguments
    /// * `now` - 현재 시각
    ///
    /// # Returns
    /// * `Option<Duration>` - 남은 시간, 저장소가 비어 있으면 None
    pub fn time_until_next_candle(&self, now: DateTime<Utc>) -> Option<Duration> {
        let last = self.items.last()?;
        let candle_end = last.datetime() + self.timeframe.duration();
        Some(candle_end - now)
    }
}
