use std::process::ExitCode;
use tickicon_convert::{Backend, Convert};

use super::ToolArgs;
use crate::{
    cli::{failure_style, print_banner, success_style},
    config::Config,
};

pub fn run(args: ToolArgs, config: &Config) -> ExitCode {
    let mut settings = config.convert.clone();
    args.apply(&mut settings);

    print_banner("Converter backends");

    for (i, backend) in Backend::all(&settings.tools()).iter().enumerate() {
        let kind = backend.kind();
        let status = if backend.available() {
            success_style().apply_to("available")
        } else {
            failure_style().apply_to("missing")
        };
        println!("{}. {:12} {:10} {}", i + 1, kind.label(), status, kind.install_hint());
    }
    ExitCode::SUCCESS
}
