use std::io::Write;

use env_logger::{Builder, Env};

pub const LOG_LEVEL_ENV: &str = "LEAGUE_STATS_LOG";

/// Builder writing `[LEVEL] message` lines to stderr, filtered by
/// `LEAGUE_STATS_LOG` (env_logger filter syntax), defaulting to `info`.
pub fn builder() -> Builder {
    let mut builder = Builder::from_env(Env::default().filter_or(LOG_LEVEL_ENV, "info"));
    builder
        .format_timestamp(None)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()));
    builder
}

/// Install the logger for a binary. A second call is a no-op.
pub fn init() {
    let _ = builder().try_init();
}

#[cfg(test)]
mod tests {
    use super::init;

    #[test]
    fn init_twice_does_not_panic() {
        init();
        init();
        log::info!("logger installed");
    }
}
