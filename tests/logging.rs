use log::LevelFilter;
use ntropy::logging::{self, AppLogger};
use ntropy::Measure;
use std::error::Error;
use termcolor::ColorChoice;

#[test]
pub fn logger_installs_once() -> Result<(), Box<dyn Error>> {
    logging::init(LevelFilter::Debug)?;
    assert_eq!(AppLogger::instance().level(), LevelFilter::Debug);
    assert_eq!(log::max_level(), LevelFilter::Debug);
    assert_ne!(AppLogger::instance().color_choice_out(), ColorChoice::Auto);
    assert_ne!(AppLogger::instance().color_choice_err(), ColorChoice::Auto);

    AppLogger::instance().set_color_choice_err(ColorChoice::Never);
    assert_eq!(AppLogger::instance().color_choice_err(), ColorChoice::Never);

    // emits the per-call debug record through the installed logger
    assert_eq!(Measure::new().run("logged", || 5), 5);

    let err = logging::init(LevelFilter::Trace).unwrap_err();
    assert_eq!(err.to_string(), "failed to install logger");
    assert!(err.source().is_some());
    Ok(())
}
