use log::{LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

/// Logger that writes one line per record to stdout.
///
/// Line format: `YYYY-MM-DDTHH:MM:SS.mmm [LEVEL] target - message`.
pub struct StdoutLogger {
    level: LevelFilter,
}

impl StdoutLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    pub fn format_record(&self, record: &Record) -> String {
        format!(
            "{} [{}] {} - {}",
            format_timestamp(SystemTime::now()),
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        println!("{}", self.format_record(record));
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

/// Install a `StdoutLogger` as the global logger.
///
/// Only the first call per process installs a logger. Later calls are
/// silently ignored, which lets every test binary call this freely.
pub fn init_stdout_logger(level: LevelFilter) {
    // set_logger needs a 'static reference; a rejected logger stays leaked.
    if log::set_logger(Box::leak(Box::new(StdoutLogger::new(level)))).is_ok() {
        log::set_max_level(level);
    }
}

/// UTC timestamp with millisecond precision.
pub fn format_timestamp(time: SystemTime) -> String {
    let since_epoch = time.duration_since(UNIX_EPOCH).unwrap_or_default();
    let secs = since_epoch.as_secs();
    let millis = since_epoch.subsec_millis();
    let (year, month, day) = civil_from_days((secs / 86_400) as i64);
    let time_of_day = secs % 86_400;
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}",
        year,
        month,
        day,
        time_of_day / 3600,
        (time_of_day % 3600) / 60,
        time_of_day % 60,
        millis
    )
}

// Howard Hinnant's days-to-civil conversion.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let day_of_era = (z - era * 146_097) as u32;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let mp = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = year_of_era as i64 + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month, day)
}
