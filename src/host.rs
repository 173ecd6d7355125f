use crate::generator::{Generator, GeneratorError};
use crate::logging::Logger;
use crate::rng::RandomSource;

/// テスト実行全体で 1 つだけ作るルートモジュール。
/// 乱数ソースはここで一度だけシードされ、全 VU に共有される。
#[derive(Debug, Clone)]
pub struct RootModule {
    rng: RandomSource,
    logger: Logger,
}

impl RootModule {
    pub fn new() -> Self {
        Self::with_source(RandomSource::from_time())
    }

    pub fn with_source(rng: RandomSource) -> Self {
        Self {
            rng,
            logger: Logger::new(),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// VU ごとのインスタンスを作る
    pub fn new_module_instance(&self, vu_id: u64) -> Datagen {
        Datagen {
            vu_id,
            rng: self.rng.clone(),
            logger: self.logger.with_field("vu", vu_id),
        }
    }
}

impl Default for RootModule {
    fn default() -> Self {
        Self::new()
    }
}

/// 1 VU 分のモジュールインスタンス
#[derive(Debug, Clone)]
pub struct Datagen {
    vu_id: u64,
    rng: RandomSource,
    logger: Logger,
}

impl Datagen {
    pub fn vu_id(&self) -> u64 {
        self.vu_id
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// スクリプトから呼ばれる Generator コンストラクタ
    pub fn generator(&self, size: i64, kind: &str) -> Result<Generator, GeneratorError> {
        let generator = Generator::new(size, kind, self.rng.clone(), &self.logger)
            .inspect_err(|e| {
                self.logger
                    .with_field("size", size)
                    .error(&format!("Generator construction failed: {e}"));
            })?;
        self.logger
            .with_field("size", size)
            .with_field("type", generator.kind().to_string())
            .debug("Generator created");
        Ok(generator)
    }
}
