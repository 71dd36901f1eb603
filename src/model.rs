use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

/// 캔들 데이터 접근 트레이트
///
/// 차트 엔진의 모든 계산은 이 트레이트를 통해 캔들 데이터에 접근합니다.
/// OHLC 불변식(`low <= min(open, close)`, `high >= max(open, close)`)은
/// 상위 데이터 공급자가 보장하지 않으므로 검증하지 않고 그대로 사용합니다.
pub trait Candle: Clone + Debug + Display + Send {
    /// 시가
    fn open_price(&self) -> f64;
    /// 고가
    fn high_price(&self) -> f64;
    /// 저가
    fn low_price(&self) -> f64;
    /// 종가
    fn close_price(&self) -> f64;
    /// 거래량
    fn volume(&self) -> f64;
    /// 캔들 시작 시각
    fn datetime(&self) -> DateTime<Utc>;

    /// 음봉(종가 < 시가) 여부
    fn is_bearish(&self) -> bool {
        self.close_price() < self.open_price()
    }

    /// 양봉(종가 > 시가) 여부
    fn is_bullish(&self) -> bool {
        self.close_price() > self.open_price()
    }
}

/// 차트 세션에서 사용하는 기본 캔들 구현체
///
/// 브로커 연동 계층이 정규화한 `{datetime, open, high, low, close, volume}`
/// 형태의 데이터를 그대로 담습니다.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartCandle {
    pub datetime: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Display for ChartCandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Candle({}, o={}, h={}, l={}, c={}, v={})",
            self.datetime, self.open, self.high, self.low, self.close, self.volume
        )
    }
}

impl Candle for ChartCandle {
    fn open_price(&self) -> f64 {
        self.open
    }

    fn high_price(&self) -> f64 {
        self.high
    }

    fn low_price(&self) -> f64 {
        self.low
    }

    fn close_price(&self) -> f64 {
        self.close
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn datetime(&self) -> DateTime<Utc> {
        self.datetime
    }
}

/// 캔들 시간 단위
///
/// 하나의 캔들이 차지하는 시간 버킷을 정의합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Minute1,
    Minute3,
    Minute5,
    Minute10,
    Minute15,
    Minute30,
    Minute45,
    Minute60,
    Minute240,
    Day,
    Week,
    Month,
}

impl Timeframe {
    /// 캔들 하나의 지속 시간
    ///
    /// # Returns
    /// * `Duration` - 시간 버킷 길이 (월봉은 30일로 취급)
    pub fn duration(&self) -> Duration {
        match self {
            Timeframe::Minute1 => Duration::minutes(1),
            Timeframe::Minute3 => Duration::minutes(3),
            Timeframe::Minute5 => Duration::minutes(5),
            Timeframe::Minute10 => Duration::minutes(10),
            Timeframe::Minute15 => Duration::minutes(15),
            Timeframe::Minute30 => Duration::minutes(30),
            Timeframe::Minute45 => Duration::minutes(45),
            Timeframe::Minute60 => Duration::minutes(60),
            Timeframe::Minute240 => Duration::minutes(240),
            Timeframe::Day => Duration::days(1),
            Timeframe::Week => Duration::weeks(1),
            Timeframe::Month => Duration::days(30),
        }
    }
}

impl Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Timeframe::Minute1 => "1m",
            Timeframe::Minute3 => "3m",
            Timeframe::Minute5 => "5m",
            Timeframe::Minute10 => "10m",
            Timeframe::Minute15 => "15m",
            Timeframe::Minute30 => "30m",
            Timeframe::Minute45 => "45m",
            Timeframe::Minute60 => "1h",
            Timeframe::Minute240 => "4h",
            Timeframe::Day => "1D",
            Timeframe::Week => "1W",
            Timeframe::Month => "1M",
        };
        write!(f, "{}", label)
    }
}

/// 트레이딩 신호 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignalType {
    /// 매수 신호 (스윙 저점)
    Buy,
    /// 매도 신호 (스윙 고점)
    Sell,
}

impl Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalType::Buy => write!(f, "BUY"),
            SignalType::Sell => write!(f, "SELL"),
        }
    }
}

/// 스윙 극점에서 발생한 트레이딩 신호
///
/// `index`는 전체 캔들 시계열 기준 위치입니다. 하나의 신호 목록 안에서
/// 연속된 신호는 항상 유형이 교대합니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    /// 전체 시계열 기준 캔들 인덱스
    pub index: usize,
    /// 신호 유형
    pub signal_type: SignalType,
    /// 신호 가격 (매수: 저가, 매도: 고가)
    pub price: f64,
    /// 신호 발생 캔들의 시각
    pub datetime: DateTime<Utc>,
}

impl Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(#{} @ {:.2})",
            self.signal_type, self.index, self.price
        )
    }
}
