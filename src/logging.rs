//! A small colored terminal backend for the `log` facade.
//!
//! The library only emits records; binaries and tests that want to see them
//! call [`init`] once at startup.

use crate::error::Error;
use log::{Level, LevelFilter};
use std::io::Write as _;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor as _};

static APP_LOGGER_LEVEL: AtomicUsize = AtomicUsize::new(LevelFilter::Error as usize);
static APP_LOGGER_COLOR_OUT: AtomicU8 = AtomicU8::new(COLOR_AUTO);
static APP_LOGGER_COLOR_ERR: AtomicU8 = AtomicU8::new(COLOR_AUTO);

const COLOR_AUTO: u8 = 0;
const COLOR_ALWAYS: u8 = 1;
const COLOR_ALWAYS_ANSI: u8 = 2;
const COLOR_NEVER: u8 = 3;

/// Installs [`AppLogger`] as the global logger, showing records up to
/// `level`. Colors are used on each stream only if it is a terminal.
pub fn init(level: LevelFilter) -> Result<(), Error> {
    let logger = AppLogger::instance();
    log::set_logger(logger)
        .map_err(|err| Error::new("failed to install logger", Box::new(err)))?;
    logger.set_level(level);
    logger.set_color_choice_out(ColorChoice::Auto);
    logger.set_color_choice_err(ColorChoice::Auto);
    Ok(())
}

pub struct AppLogger;

impl AppLogger {
    pub fn instance() -> &'static AppLogger {
        static INSTANCE: AppLogger = AppLogger;
        &INSTANCE
    }

    pub fn level(&self) -> LevelFilter {
        level_from_usize(APP_LOGGER_LEVEL.load(Ordering::Relaxed))
    }

    pub fn set_level(&self, level: LevelFilter) {
        APP_LOGGER_LEVEL.store(level as usize, Ordering::Relaxed);
        log::set_max_level(level);
    }

    pub fn color_choice_out(&self) -> ColorChoice {
        color_from_u8(APP_LOGGER_COLOR_OUT.load(Ordering::Relaxed))
    }

    pub fn color_choice_err(&self) -> ColorChoice {
        color_from_u8(APP_LOGGER_COLOR_ERR.load(Ordering::Relaxed))
    }

    /// `ColorChoice::Auto` is resolved against the stream right away, so
    /// that colors are only used when stdout is a terminal.
    pub fn set_color_choice_out(&self, choice: ColorChoice) {
        let choice = resolve_color_choice(choice, atty::Stream::Stdout);
        APP_LOGGER_COLOR_OUT.store(color_to_u8(choice), Ordering::Relaxed);
    }

    pub fn set_color_choice_err(&self, choice: ColorChoice) {
        let choice = resolve_color_choice(choice, atty::Stream::Stderr);
        APP_LOGGER_COLOR_ERR.store(color_to_u8(choice), Ordering::Relaxed);
    }

    fn write_log(&self, record: &log::Record) -> std::io::Result<()> {
        let (level, color, use_stderr) = match record.level() {
            Level::Error => ("error", Color::Red, true),
            Level::Warn => ("warning", Color::Yellow, true),
            Level::Info => ("info", Color::Blue, false),
            Level::Debug => ("debug", Color::Green, true),
            Level::Trace => ("trace", Color::Magenta, true),
        };

        let mut output = if use_stderr {
            StandardStream::stderr(self.color_choice_err())
        } else {
            StandardStream::stdout(self.color_choice_out())
        };

        let mut level_color = ColorSpec::new();
        level_color.set_fg(Some(color)).set_bold(true);
        let mut reset_color = ColorSpec::new();
        reset_color.set_reset(true);

        output.set_color(&level_color)?;
        write!(output, "{:>width$}(", level, width = 7)?;
        output.set_color(&reset_color)?;
        write!(output, "{}", record.target())?;
        output.set_color(&level_color)?;
        write!(output, "): ")?;
        output.set_color(&reset_color)?;
        writeln!(output, "{}", record.args())?;

        Ok(())
    }
}

impl log::Log for AppLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            // Nowhere left to report a failure to write a log line.
            let _ = self.write_log(record);
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
    }
}

fn resolve_color_choice(choice: ColorChoice, stream: atty::Stream) -> ColorChoice {
    match choice {
        ColorChoice::Auto if atty::is(stream) => ColorChoice::Always,
        ColorChoice::Auto => ColorChoice::Never,
        choice => choice,
    }
}

fn level_from_usize(level: usize) -> LevelFilter {
    match level {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn color_to_u8(choice: ColorChoice) -> u8 {
    match choice {
        ColorChoice::Auto => COLOR_AUTO,
        ColorChoice::Always => COLOR_ALWAYS,
        ColorChoice::AlwaysAnsi => COLOR_ALWAYS_ANSI,
        ColorChoice::Never => COLOR_NEVER,
    }
}

fn color_from_u8(choice: u8) -> ColorChoice {
    match choice {
        COLOR_ALWAYS => ColorChoice::Always,
        COLOR_ALWAYS_ANSI => ColorChoice::AlwaysAnsi,
        COLOR_NEVER => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
