use std::io::Write;

use anyhow::Context;
use payloadgen::config::{Config, OutputMode};
use payloadgen::logging::{self, Logger};
use payloadgen::{Datagen, RootModule};
use serde::Serialize;

/// json 出力 1 行分
#[derive(Serialize)]
struct PayloadSummary<'a> {
    vu: u64,
    seq: u64,
    len: usize,
    hash: &'a str,
}

fn run_vu(vu: &Datagen, config: &Config) -> anyhow::Result<()> {
    let mut generator = vu
        .generator(config.size, &config.payload_type)
        .with_context(|| format!("VU {}: failed to create generator", vu.vu_id()))?;

    let stdout = std::io::stdout();
    for seq in 0..config.count {
        let payload = generator.gen_payload(config.hash);
        let mut out = stdout.lock();
        match config.output {
            OutputMode::Json => {
                let line = serde_json::to_string(&PayloadSummary {
                    vu: vu.vu_id(),
                    seq,
                    len: payload.data.len(),
                    hash: &payload.hash,
                })?;
                writeln!(out, "{line}")?;
            }
            OutputMode::Raw => out.write_all(&payload.data)?,
        }
    }

    vu.logger().debug("VU finished");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    logging::init(&config.log)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("Failed to initialize logging")?;

    tracing::info!(
        "payloadgen v{} starting: size={} type='{}' count={} vus={} hash={} output={}",
        env!("CARGO_PKG_VERSION"),
        config.size,
        config.payload_type,
        config.count,
        config.vus,
        config.hash,
        config.output
    );

    let root = RootModule::new().with_logger(Logger::new().with_field("pid", std::process::id()));

    // VU ごとに専用スレッドと専用 Generator を持たせる
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..config.vus)
            .map(|id| {
                let vu = root.new_module_instance(id);
                let config = &config;
                s.spawn(move || run_vu(&vu, config))
            })
            .collect();

        handles.into_iter().try_for_each(|h| {
            h.join()
                .map_err(|_| anyhow::anyhow!("VU thread panicked"))?
        })
    })?;

    std::io::stdout().flush()?;
    tracing::info!("payloadgen finished");
    Ok(())
}
