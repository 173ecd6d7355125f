use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

use chrono::Local;
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// `Logger` のフィールドを載せるイベントフィールド名
const FIELDS_KEY: &str = "fields";

/// ログ設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// tracing subscriber を初期化する。
///
/// `RUST_LOG` が設定されていればそちらを優先し、なければ `config.level` を使う。
/// stdout はペイロード出力に使うのでログは stderr に出す。
pub fn init(config: &LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.format {
        LogFormat::Text => builder
            .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
            .with_ansi(true)
            .try_init(),
        LogFormat::Json => builder.event_format(JsonLines).try_init(),
    }
}

/// 1 イベント 1 行の JSON フォーマッタ
///
/// `Logger` が付けた `fields` はトップレベルのキーに展開する。
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLines;

impl<S, N> FormatEvent<S, N> for JsonLines
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let mut record = Map::new();
        record.insert(
            "time".to_string(),
            Value::String(Local::now().format(TIMESTAMP_FORMAT).to_string()),
        );
        record.insert("level".to_string(), Value::String(meta.level().to_string()));
        record.insert("target".to_string(), Value::String(meta.target().to_string()));

        event.record(&mut JsonVisitor(&mut record));

        let line = serde_json::to_string(&record).map_err(|_| fmt::Error)?;
        writeln!(writer, "{line}")
    }
}

struct JsonVisitor<'a>(&'a mut Map<String, Value>);

impl JsonVisitor<'_> {
    fn insert(&mut self, field: &Field, value: Value) {
        self.0.insert(field.name().to_string(), value);
    }
}

impl Visit for JsonVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let text = format!("{value:?}");
        if field.name() == FIELDS_KEY {
            if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(&text) {
                self.0.extend(fields);
                return;
            }
        }
        self.insert(field, Value::String(text));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::String(value.to_string()));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::Bool(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }
}

/// フィールド付きロガー
///
/// `with_field` / `with_fields` は元のロガーを変更せず、フィールドを追加した
/// コピーを返す。
#[derive(Debug, Clone, Default)]
pub struct Logger {
    fields: BTreeMap<String, Value>,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut fields = self.fields.clone();
        fields.insert(key.into(), value.into());
        Self { fields }
    }

    pub fn with_fields(&self, extra: &Map<String, Value>) -> Self {
        let mut fields = self.fields.clone();
        for (k, v) in extra {
            fields.insert(k.clone(), v.clone());
        }
        Self { fields }
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// フィールドを JSON オブジェクトとして書き出す（キー順）
    pub fn fields_json(&self) -> String {
        let object: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Value::Object(object).to_string()
    }

    pub fn debug(&self, msg: &str) {
        self.log(Level::DEBUG, msg);
    }

    pub fn info(&self, msg: &str) {
        self.log(Level::INFO, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.log(Level::WARN, msg);
    }

    pub fn error(&self, msg: &str) {
        self.log(Level::ERROR, msg);
    }

    pub fn log(&self, level: Level, msg: &str) {
        let fields = self.fields_json();
        match level {
            Level::ERROR => tracing::error!(fields = %fields, "{msg}"),
            Level::WARN => tracing::warn!(fields = %fields, "{msg}"),
            Level::INFO => tracing::info!(fields = %fields, "{msg}"),
            Level::DEBUG => tracing::debug!(fields = %fields, "{msg}"),
            _ => tracing::trace!(fields = %fields, "{msg}"),
        }
    }
}
