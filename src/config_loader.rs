use log::{debug, error, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// 설정 로드 오류
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 오류
    FileError(String),
    /// 파싱 오류
    ParseError(String),
    /// 유효성 검사 오류
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileError(msg) => write!(f, "설정 파일 오류: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "설정 파싱 오류: {}", msg),
            ConfigError::ValidationError(msg) => write!(f, "설정 유효성 검사 오류: {}", msg),
        }
    }
}

/// 설정 로드 결과
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 설정 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON 형식
    Json,
    /// TOML 형식
    Toml,
    /// 자동 감지 (파일 확장자로부터)
    Auto,
}

/// 설정 유효성 검사 트레이트
pub trait ConfigValidation {
    /// 설정 유효성 검사
    fn validate(&self) -> ConfigResult<()>;
}

/// 설정 파일 로더
#[derive(Debug)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// 파일에서 설정 로드
    ///
    /// # Arguments
    /// * `path` - 설정 파일 경로
    /// * `format` - 설정 파일 형식 (Auto면 확장자로 감지)
    ///
    /// # Returns
    /// * `ConfigResult<T>` - 설정 객체 또는 오류
    pub fn load_from_file<T>(path: &Path, format: ConfigFormat) -> ConfigResult<T>
    where
        T: DeserializeOwned + ConfigValidation,
    {
        debug!("설정 파일 로드 시작: {}", path.display());

        let format = if format == ConfigFormat::Auto {
            Self::detect_format(path)?
        } else {
            format
        };

        let content = fs::read_to_string(path).map_err(|e| {
            error!("설정 파일 읽기 실패: {} - {}", path.display(), e);
            ConfigError::FileError(format!("파일 읽기 실패: {}", e))
        })?;

        let config: T = match format {
            ConfigFormat::Json => Self::parse_json(&content)?,
            ConfigFormat::Toml => Self::parse_toml(&content)?,
            ConfigFormat::Auto => unreachable!(),
        };

        if let Err(e) = config.validate() {
            error!("설정 유효성 검사 실패: {}", e);
            return Err(e);
        }

        info!("설정 파일 로드 완료: {}", path.display());
        Ok(config)
    }

    /// 문자열에서 설정 로드
    ///
    /// # Arguments
    /// * `content` - 설정 문자열
    /// * `format` - 설정 형식 (Auto면 JSON 먼저, 실패 시 TOML)
    ///
    /// # Returns
    /// * `ConfigResult<T>` - 설정 객체 또는 오류
    pub fn load_from_string<T>(content: &str, format: ConfigFormat) -> ConfigResult<T>
    where
        T: DeserializeOwned + ConfigValidation,
    {
        let config: T = match format {
            ConfigFormat::Json => Self::parse_json(content)?,
            ConfigFormat::Toml => Self::parse_toml(content)?,
            ConfigFormat::Auto => match Self::parse_json::<T>(content) {
                Ok(config) => config,
                Err(_) => Self::parse_toml(content)?,
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// 설정 파일 저장
    ///
    /// # Arguments
    /// * `config` - 설정 객체
    /// * `path` - 저장할 파일 경로
    /// * `format` - 설정 파일 형식 (Auto면 확장자 기준, 기본 TOML)
    ///
    /// # Returns
    /// * `ConfigResult<()>` - 성공 또는 오류
    pub fn save_to_file<T>(config: &T, path: &Path, format: ConfigFormat) -> ConfigResult<()>
    where
        T: Serialize + ConfigValidation,
    {
        debug!("설정 파일 저장 시작: {}", path.display());

        let format = if format == ConfigFormat::Auto {
            Self::detect_format(path).unwrap_or(ConfigFormat::Toml)
        } else {
            format
        };

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(|e| {
                error!("JSON 직렬화 실패: {}", e);
                ConfigError::ParseError(format!("JSON 직렬화 실패: {}", e))
            })?,
            ConfigFormat::Toml => toml::to_string_pretty(config).map_err(|e| {
                error!("TOML 직렬화 실패: {}", e);
                ConfigError::ParseError(format!("TOML 직렬화 실패: {}", e))
            })?,
            ConfigFormat::Auto => unreachable!(),
        };

        fs::write(path, &content).map_err(|e| {
            error!("설정 파일 쓰기 실패: {} - {}", path.display(), e);
            ConfigError::FileError(format!("파일 쓰기 실패: {}", e))
        })?;

        info!("설정 파일 저장 완료: {}", path.display());
        Ok(())
    }

    /// JSON 파싱
    fn parse_json<T: DeserializeOwned>(content: &str) -> ConfigResult<T> {
        serde_json::from_str(content).map_err(|e| {
            warn!("JSON 파싱 실패: {}", e);
            ConfigError::ParseError(format!("JSON 파싱 실패: {}", e))
        })
    }

    /// TOML 파싱
    fn parse_toml<T: DeserializeOwned>(content: &str) -> ConfigResult<T> {
        toml::from_str(content).map_err(|e| {
            warn!("TOML 파싱 실패: {}", e);
            ConfigError::ParseError(format!("TOML 파싱 실패: {}", e))
        })
    }

    /// 파일 형식 감지
    fn detect_format(path: &Path) -> ConfigResult<ConfigFormat> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => {
                warn!("지원되지 않는 파일 형식: {}", path.display());
                Err(ConfigError::FileError(format!(
                    "파일 형식을 감지할 수 없음: {}",
                    path.display()
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize)]
    struct TestConfig {
        pub period: usize,
        pub threshold: f64,
    }

    impl ConfigValidation for TestConfig {
        fn validate(&self) -> ConfigResult<()> {
            if self.period == 0 {
                return Err(ConfigError::ValidationError(
                    "period는 0보다 커야 합니다".to_string(),
                ));
            }
            Ok(())
        }
    }

    #[test]
    fn test_load_from_json_string() {
        let json = r#"{"period":14,"threshold":0.05}"#;
        let config =
            ConfigLoader::load_from_string::<TestConfig>(json, ConfigFormat::Json).unwrap();
        assert_eq!(config.period, 14);
        assert_eq!(config.threshold, 0.05);
    }

    #[test]
    fn test_load_from_toml_string() {
        let toml_str = r#"
            period = 14
            threshold = 0.05
        "#;
        let config =
            ConfigLoader::load_from_string::<TestConfig>(toml_str, ConfigFormat::Toml).unwrap();
        assert_eq!(config.period, 14);
        assert_eq!(config.threshold, 0.05);
    }

    #[test]
    fn test_validation_error() {
        let json = r#"{"period":0,"threshold":0.05}"#;
        let result = ConfigLoader::load_from_string::<TestConfig>(json, ConfigFormat::Json);
        match result {
            Err(ConfigError::ValidationError(_)) => (),
            _ => panic!("유효성 검사 오류가 발생해야 함"),
        }
    }

    #[test]
    fn test_save_and_load_file() {
        let config = TestConfig {
            period: 14,
            threshold: 0.05,
        };

        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("config.toml");

        ConfigLoader::save_to_file(&config, &toml_path, ConfigFormat::Auto).unwrap();
        let loaded =
            ConfigLoader::load_from_file::<TestConfig>(&toml_path, ConfigFormat::Auto).unwrap();
        assert_eq!(loaded.period, 14);
    }
}
