//! The `lotledger` binary.

use std::process::ExitCode;

fn main() -> ExitCode {
    lotledger::cmd::main()
}
