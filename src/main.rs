use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use lc3::error::RunError;
use lc3::terminal::Terminal;
use lc3::Machine;

fn main() -> ExitCode {
    env_logger::init();

    let paths: Vec<PathBuf> = env::args().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        println!("Usage: lc3vm [image-file1] ... \n");
        return ExitCode::FAILURE;
    }

    let mut machine = Machine::new();
    for path in &paths {
        match machine.load_image(path) {
            Ok(stats) => log::info!("loaded {} words at {:#06x} from {}", stats.words_loaded, stats.origin, path.display()),
            Err(failure) => println!("{failure}"),
        }
    }

    let mut terminal = Terminal::new();
    if let Err(err) = terminal.enter_raw_mode() {
        log::warn!("failed to enter raw mode: {err}");
    }
    if let Err(err) = terminal.install_interrupt_handler() {
        log::warn!("failed to install interrupt handler: {err}");
    }

    let result = machine.run(&mut terminal);
    terminal.leave_raw_mode();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(RunError::InvalidOpcode) => {
            println!("Invalid opcode!\n");
            ExitCode::FAILURE
        }
        Err(RunError::Usage) => {
            println!("Usage: lc3vm [image-file1] ... \n");
            ExitCode::FAILURE
        }
    }
}
