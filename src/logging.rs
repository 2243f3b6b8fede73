use std::path::{Path, PathBuf};

use anyhow::Context;
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};

const LOG_FILE: &str = "skycast.log";
const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l} {t} - {m}{n}";

#[must_use]
pub fn log_path(dir: &Path) -> PathBuf {
    dir.join(LOG_FILE)
}

fn build_config(path: &Path, level: LevelFilter) -> anyhow::Result<Config> {
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(path)
        .with_context(|| format!("opening log file {} failed", path.display()))?;

    Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)))
        .build(Root::builder().appender("file").build(level))
        .context("building log configuration failed")
}

/// Routes the `log` facade to a file, since the terminal belongs to the UI.
/// Does nothing when the level is `Off` or no directory is known.
pub fn init(dir: Option<&Path>, level: LevelFilter) -> anyhow::Result<Option<PathBuf>> {
    let Some(dir) = dir.filter(|_| level != LevelFilter::Off) else {
        return Ok(None);
    };
    std::fs::create_dir_all(dir).context("creating log directory failed")?;
    let path = log_path(dir);
    let config = build_config(&path, level)?;
    log4rs::init_config(config).context("installing logger failed")?;
    Ok(Some(path))
}
