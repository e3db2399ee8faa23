//! `ifc-checker` — наблюдение за `.ifc` файлами в папке.
//!
//! Строки уведомлений идут в stdout (GUI-оболочка ретранслирует их как есть),
//! диагностика — в stderr.

use std::process::ExitCode;
use std::sync::mpsc;

use clap::Parser;
use log::error;

use ifc_checker::config::Cli;
use ifc_checker::error::IfcCheckerError;
use ifc_checker::logging::init_logging;
use ifc_checker::session::run_session;
use ifc_checker::sink::{ConsoleSink, LineSink};

fn main() -> ExitCode {
    init_logging();

    let config = Cli::parse().into_session_config();

    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = shutdown_tx.send(());
    }) {
        error!("{}", IfcCheckerError::from(e));
        return ExitCode::FAILURE;
    }

    let mut console = ConsoleSink;
    match run_session(&config, Box::new(ConsoleSink), &shutdown_rx) {
        Ok(()) => {
            let _ = console.write_line(&config.stopped_message());
            ExitCode::SUCCESS
        }
        // Не папка: сообщаем и выходим без мониторинга.
        Err(IfcCheckerError::NotADirectory(_)) => {
            let _ = console.write_line(&config.error_message());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Monitoring failed: {e}");
            ExitCode::FAILURE
        }
    }
}
