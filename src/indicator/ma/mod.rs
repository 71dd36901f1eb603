pub mod ema;
pub mod sma;

pub use ema::EmaBuilder;
pub use sma::SmaBuilder;

use crate::model::Candle;

/// 캔들 시계열에서 종가 배열을 추출합니다.
pub(crate) fn close_prices<C: Candle>(data: &[C]) -> Vec<f64> {
    data.iter().map(|candle| candle.close_price()).collect()
}
