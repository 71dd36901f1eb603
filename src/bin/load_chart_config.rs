use chart_engine::chart_config::ChartConfig;
use chart_engine::config_loader::{ConfigFormat, ConfigLoader};
use log::{debug, error, info, warn};
use std::env;
use std::path::PathBuf;

/// 기본 설정 파일 경로
const DEFAULT_CONFIG_PATH: &str = "config/chart.toml";

fn main() {
    // 로그 초기화
    env_logger::init();

    info!("차트 설정 로더 시작");

    // 커맨드 라인 인수 파싱
    let args: Vec<String> = env::args().collect();
    debug!("커맨드 라인 인수: {:?}", args);

    let config_path = if args.len() >= 2 {
        debug!("사용자 지정 설정 파일 사용: {}", args[1]);
        PathBuf::from(&args[1])
    } else {
        debug!("기본 설정 파일 경로 사용: {}", DEFAULT_CONFIG_PATH);
        PathBuf::from(DEFAULT_CONFIG_PATH)
    };

    if !config_path.exists() {
        warn!("설정 파일이 존재하지 않습니다: {}", config_path.display());
        println!(
            "경고: 설정 파일이 존재하지 않아 기본 설정을 사용합니다: {}",
            config_path.display()
        );
        print_summary(&ChartConfig::default());
        return;
    }

    match ConfigLoader::load_from_file::<ChartConfig>(&config_path, ConfigFormat::Auto) {
        Ok(config) => {
            info!("설정 로드 성공: {}", config_path.display());
            print_summary(&config);
        }
        Err(e) => {
            error!("설정 로드 실패: {}", e);
            println!("설정 로드 실패: {}", e);
            std::process::exit(1);
        }
    }
}

/// 로드된 설정 요약 출력
fn print_summary(config: &ChartConfig) {
    println!("== 차트 엔진 설정 ==");
    println!(
        "지표: SMA {:?}, EMA {:?}, BB({}, x{}), RSI({}), MACD({}/{}/{})",
        config.indicator.sma_periods,
        config.indicator.ema_periods,
        config.indicator.bband_period,
        config.indicator.bband_multiplier,
        config.indicator.rsi_period,
        config.indicator.macd_fast,
        config.indicator.macd_slow,
        config.indicator.macd_signal
    );
    println!(
        "신호: look_around={}, min_distance={}",
        config.signal.look_around, config.signal.min_distance
    );
    println!(
        "컵앤핸들: 구간 {}, 림 허용 {:.0}%, 컵 깊이 {:.0}%+, 핸들 {:.0}~{:.0}%",
        config.cup_handle.max_cup_length,
        config.cup_handle.rim_tolerance * 100.0,
        config.cup_handle.min_cup_depth * 100.0,
        config.cup_handle.min_handle_depth * 100.0,
        config.cup_handle.max_handle_depth * 100.0
    );
    println!(
        "역헤드앤숄더: 구간 {}, 어깨 허용 {:.0}%",
        config.head_shoulders.lookback,
        config.head_shoulders.shoulder_tolerance * 100.0
    );
    println!(
        "시뮬레이터: 행사가 간격 {}, 랏 {}x{}, 하한 {:.0}%, 시간가치 {:.0}%",
        config.simulator.strike_step,
        config.simulator.lot_size,
        config.simulator.lots,
        config.simulator.premium_floor_pct * 100.0,
        config.simulator.time_value_pct * 100.0
    );
}
