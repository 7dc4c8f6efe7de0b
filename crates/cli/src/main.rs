use std::process::ExitCode;

fn main() -> ExitCode {
    trattoria_cli::run()
}
