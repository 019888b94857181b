use std::process::ExitCode;

fn main() -> ExitCode {
    caufi_pdp::run()
}
