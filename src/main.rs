mod terminal;
mod config;
mod icon;
mod xlib;
mod pty;

use terminal::Terminal;

use log::error;

use std::{env, process};


fn main() {
    env_logger::init();

    let command = env::args().nth(1);

    let mut terminal = match Terminal::new(command) {
        Ok(terminal) => terminal,
        Err(err) => {
            error!("failed to create terminal: {}", err);
            process::exit(1);
        },
    };

    if let Err(err) = terminal.run() {
        error!("terminal failed: {}", err);
        process::exit(1);
    }
}
