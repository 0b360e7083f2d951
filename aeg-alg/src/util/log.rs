use log::LevelFilter;

/// Installs a terminal logger writing to stderr.
pub fn init_simple_logger(l: LevelFilter) -> Result<(), log::SetLoggerError> {
    use simplelog::*;

    let mut cb = ConfigBuilder::new();
    cb.set_location_level(LevelFilter::Off);
    cb.set_target_level(LevelFilter::Off);
    cb.set_thread_level(LevelFilter::Off);
    cb.set_level_color(Level::Trace, Some(Color::Green));
    let config = cb.build();

    TermLogger::init(
        l,
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto
    )
}

/// `0` off, `1` info, `2` debug, `3` trace.
pub fn level_filter(level: u8) -> LevelFilter {
    match level {
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        3 => LevelFilter::Trace,
        _ => LevelFilter::Off
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels() {
        assert_eq!(level_filter(0), LevelFilter::Off);
        assert_eq!(level_filter(2), LevelFilter::Debug);
        assert_eq!(level_filter(9), LevelFilter::Off);
    }
}
