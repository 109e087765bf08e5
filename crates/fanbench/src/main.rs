//! fanbench: compare concurrency strategies on I/O- and CPU-bound fan-out.

use fanbench_cli::ui::print_error;
use fanbench_lib::{app, config, errors, logging};

fn main() {
    logging::init();

    let config = config::AppConfig::parse();
    if let Err(err) = app::run(&config) {
        print_error(&format!("{err:#}"));
        std::process::exit(errors::exit_code(&err));
    }
}
