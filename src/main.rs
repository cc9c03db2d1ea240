use clap::Parser;
use log::{error, info};
use std::path::{Path, PathBuf};

use rera_scraper::config::Config;
use rera_scraper::driver::ScrapeDriver;
use rera_scraper::output;

/// Scrape project records from the Odisha RERA registry into a CSV file
#[derive(Parser, Debug)]
#[command(name = "rera-scraper", version, about)]
struct Cli {
    /// Number of listing entries to attempt
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
    num_items: Option<u64>,

    /// Path of the CSV output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Run with a visible browser window
    #[arg(long)]
    headed: bool,
}

fn init_logging() {
    if log4rs::init_file("log4rs.yml", Default::default()).is_ok() {
        return;
    }

    // No log4rs.yml next to the binary; fall back to a console appender
    use log4rs::append::console::ConsoleAppender;
    use log4rs::config::{Appender, Root};
    use log4rs::encode::pattern::PatternEncoder;

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}",
        )))
        .build();
    if let Ok(config) = log4rs::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(log::LevelFilter::Info))
    {
        let _ = log4rs::init_config(config);
    }
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let mut config = Config::load_from(&cli.config);
    if let Some(n) = cli.num_items {
        config.num_items = n as usize;
    }
    if let Some(output) = cli.output {
        config.output_path = output.to_string_lossy().into_owned();
    }
    if cli.headed {
        config.browser.headless = false;
    }

    // The driver (and with it the browser) is released before the
    // output is written, no matter how the run went
    let records = match ScrapeDriver::new(config.clone()) {
        Ok(driver) => driver.run(config.num_items),
        Err(e) => {
            error!("Could not start the browser session: {}", e);
            Vec::new()
        }
    };

    let output_path = Path::new(&config.output_path);
    match output::write_records(output_path, &records) {
        Ok(()) => info!(
            "Wrote {} row(s) to {}",
            records.len(),
            output_path.display()
        ),
        Err(e) => error!(
            "Could not write the output file {}: {}",
            output_path.display(),
            e
        ),
    }

    info!("Scraping run complete");
}
