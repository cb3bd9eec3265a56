use meraki_public_ips::config::{Config, LOG_CONFIG_FILE};
use meraki_public_ips::meraki::EnvCredentialStore;
use meraki_public_ips::output::{failure, Terminal};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    meraki_public_ips::logging::init(LOG_CONFIG_FILE);
    log::info!("#Start main()");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Error locating the executable directory: {e}");
            eprintln!("{}", failure(&format!("Cannot locate the reports directory: {e}")));
            return ExitCode::FAILURE;
        }
    };

    let mut store = EnvCredentialStore::default();
    let mut console = Terminal;

    match meraki_public_ips::run(&config, &mut store, &mut console) {
        Ok(path) => {
            log::info!("#End main() report={}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("#End main() failed: {e}");
            eprintln!("{}", failure(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}
