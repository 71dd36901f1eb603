pub mod candle_store;
pub mod indicator;
pub mod model;
pub mod pattern;
pub mod signal;
pub mod simulate;

/// 설정 로더
pub mod config_loader;

/// 차트 엔진 통합 설정
pub mod chart_config;
