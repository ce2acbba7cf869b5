use std::process;

fn main() {
    advisor_core::init();
    if let Err(err) = advisor_core::cli::run_cli() {
        advisor_core::cli::output::error(format!("Fatal: {err}"));
        process::exit(1);
    }
}
