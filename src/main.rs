use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    let result = wsfmt::run(&mut std::io::stdout(), std::env::args());
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
