use std::process::ExitCode;

use coi_server::server::Interrupt;
use coi_server::{logger, AppState, Config, Server, ServerError};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_server_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ServerError> {
    let cfg = Config::load()?;

    // Requests are served one at a time on this thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async_main(cfg));

    // Don't wait on file reads still running on the blocking pool
    runtime.shutdown_background();
    result
}

async fn async_main(cfg: Config) -> Result<(), ServerError> {
    let mut interrupt = Interrupt::subscribe()?;

    let state = AppState::new(cfg)?;
    let server = Server::bind(state)?;

    logger::log_server_start(&server.state().config);

    server.run_until(interrupt.recv()).await;

    logger::log_shutdown();
    Ok(())
}
