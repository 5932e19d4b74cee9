use log::error;
use crate::shell::Shell;

mod budget;
mod csv_handler;
mod error;
mod expense_store;
mod shell;
mod validation;

const EXPENSES_FILE: &str = "expenses.csv";

fn main() {
    env_logger::init();
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    let mut shell = Shell::new(stdin.lock(), stdout.lock(), EXPENSES_FILE);
    let result = shell.load_expenses().and_then(|()| shell.run());
    if let Err(e) = result {
        error!("Interactive session stopped on an I/O error: {}", e);
    }
}
