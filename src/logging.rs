use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

/// Logs go to a file: stdout belongs to the game for the whole session.
/// Best effort, the game runs fine without a logger.
pub fn setup() {
    let path = std::env::temp_dir().join("cobra.log");

    let file_appender = match FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{l} {d(%H:%M:%S.%3f)} {f}:{L} {m}{n}",
        )))
        .build(path)
    {
        Ok(appender) => appender,
        Err(_) => return,
    };

    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(Root::builder().appender("file").build(LevelFilter::Info));

    if let Ok(config) = config {
        let _ = log4rs::init_config(config);
    }
}
