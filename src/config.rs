use std::env;
use std::fmt;
use std::str::FromStr;

use crate::logging::{LogConfig, LogFormat};

/// ペイロードの出力先形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// ペイロードごとに 1 行の JSON サマリ
    Json,
    /// ペイロードのバイト列をそのまま stdout へ
    Raw,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputMode::Json),
            "raw" => Ok(OutputMode::Raw),
            _ => Err(format!("Unknown output mode: {}", s)),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Json => write!(f, "json"),
            OutputMode::Raw => write!(f, "raw"),
        }
    }
}

pub struct Config {
    /// 正の値であることの検証は Generator 側で行う
    pub size: i64,
    /// 未検証のまま Generator に渡す
    pub payload_type: String,
    pub count: u64,
    pub vus: u64,
    pub hash: bool,
    pub output: OutputMode,
    pub log: LogConfig,
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    pub fn from_env() -> Self {
        let size = env::var("PAYLOADGEN_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1024);

        let payload_type = env::var("PAYLOADGEN_TYPE").unwrap_or_else(|_| "random".to_string());

        let count = env::var("PAYLOADGEN_COUNT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);

        let vus = env::var("PAYLOADGEN_VUS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &u64| n > 0)
            .unwrap_or(1);

        let hash = env::var("PAYLOADGEN_HASH")
            .ok()
            .and_then(|v| parse_bool(&v))
            .unwrap_or(true);

        let output = env::var("PAYLOADGEN_OUTPUT")
            .ok()
            .and_then(|v| OutputMode::from_str(&v).ok())
            .unwrap_or(OutputMode::Json);

        let level = env::var("PAYLOADGEN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let format = env::var("PAYLOADGEN_LOG_FORMAT")
            .ok()
            .and_then(|v| LogFormat::from_str(&v).ok())
            .unwrap_or_default();

        Self {
            size,
            payload_type,
            count,
            vus,
            hash,
            output,
            log: LogConfig { level, format },
        }
    }
}
