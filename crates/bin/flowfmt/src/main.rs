use std::process::ExitCode;

fn main() -> ExitCode {
    flowfmt::lib_main()
}
