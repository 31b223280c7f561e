use cidr_summary::cli::{self, Cli};
use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};

fn init_logging() {
    // Prefer the config file; fall back to a console appender so the
    // binary works from any directory.
    if log4rs::init_file("log4rs.yml", Default::default()).is_err() {
        let stdout = ConsoleAppender::builder().build();
        let config = Config::builder()
            .appender(Appender::builder().build("stdout", Box::new(stdout)))
            .build(Root::builder().appender("stdout").build(LevelFilter::Warn))
            .expect("Error building fallback log config");
        log4rs::init_config(config).expect("Error initializing logging");
    }
}

fn main() {
    // Do as little as possible in main.rs as it can't contain any tests
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = cli::run(&cli) {
        if cli.json {
            // Hard failures keep the structured shape for JSON consumers.
            println!(
                "{}",
                serde_json::json!({ "success": false, "error": e.to_string() })
            );
        } else {
            eprintln!("error: {}", e);
        }
        std::process::exit(1);
    }
}
