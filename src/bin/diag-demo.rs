#![deny(unsafe_code)]

//! Exercises the diagnostics library, including its terminating paths.
//!
//! Without flags the demo prints every emitter, banner and gate once and
//! exits successfully. Each exit flag drives one terminating path; reaching
//! the end of the program after one of them is reported as a failure.

use std::process::ExitCode;

use clap::Parser;
use logging::{CheckArgs, DiagConfig, FlagGate, LevelGate, MaskGate};

#[derive(Debug, Parser)]
#[command(name = "diag-demo", version, about = "Tour of the diagkit diagnostics")]
struct Args {
    /// Fail a boolean check that exits.
    #[arg(long)]
    chk_tru_x: bool,
    /// Fail an error check that exits.
    #[arg(long)]
    chk_err_x: bool,
    /// Fail a boolean check that panics.
    #[arg(long)]
    panic: bool,
    /// Call `fatal` unconditionally.
    #[arg(long)]
    fatal: bool,
    /// Call `fatal_if` with a true condition.
    #[arg(long)]
    fatal_if: bool,
    /// Call `fatal_if_err` with an error.
    #[arg(long)]
    fatal_if_err: bool,
    /// Emit through a flag gate whose countdown expires after N emissions.
    #[arg(long, value_name = "N")]
    countdown: Option<u32>,
    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
    /// Configuration tokens such as `level=3` or `mask=0xA`.
    #[arg(long = "diag", value_name = "KEY=VALUE", value_delimiter = ',')]
    diag: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
#[error("MyErr")]
struct DemoError;

fn closer() {
    logging::message("Closer was called");
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match DiagConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            logging::error(format_args!("diag-demo: {err}"));
            return ExitCode::from(2);
        }
    };
    for token in &args.diag {
        if let Err(err) = config.apply_token(token) {
            logging::error(format_args!("diag-demo: {err}"));
            return ExitCode::from(2);
        }
    }
    if args.no_color {
        config.color = logging::ColorChoice::Never;
    }
    logging::init(config);

    let failure: Result<(), DemoError> = Err(DemoError);
    let mut exiting = false;

    if args.chk_tru_x {
        exiting = true;
        logging::chk_tru_x(false, CheckArgs::text("False, exiting").with_closer(closer));
    }
    if args.chk_err_x {
        exiting = true;
        logging::chk_err_x(&failure, CheckArgs::text("Error, exiting").with_closer(closer));
    }
    if args.panic {
        exiting = true;
        logging::chk_tru_p(false, CheckArgs::text("False, panicking").with_closer(closer));
    }
    if args.fatal {
        logging::fatal(CheckArgs::text("Fatal, exiting").with_closer(closer));
    }
    if args.fatal_if {
        exiting = true;
        logging::fatal_if(true, CheckArgs::text("True, exiting").with_closer(closer));
    }
    if args.fatal_if_err {
        exiting = true;
        logging::fatal_if_err(&failure, CheckArgs::text("Error, exiting").with_closer(closer));
    }
    if let Some(count) = args.countdown {
        exiting = true;
        let mut gate = FlagGate::new(true).with_max_out(count);
        for remaining in (0..count).rev() {
            gate.echo(remaining);
        }
    }
    if exiting {
        logging::error_banner("--- Well, we shouldn't be here...");
        return ExitCode::FAILURE;
    }

    tour();
    ExitCode::SUCCESS
}

fn tour() {
    logging::echo("Echo text");
    logging::note("Note text");
    logging::info("Info text");
    logging::message("Message text");
    logging::status("Status text");
    logging::warning("Warning text");
    logging::caution("Caution text");
    logging::failed("Failed text");
    logging::error("Error text");
    logging::danger("Danger text");
    logging::warning_banner("WARNING text");
    logging::caution_banner("CAUTION text");
    logging::error_banner("ERROR text");
    logging::fault_banner("FAULT text");

    let mut bug = FlagGate::new(true);
    bug.info("gate{true} Info text");
    bug.enabled = false;
    bug.info("gate{false} Info text FAILED");

    let lvl = LevelGate::new(5);
    lvl.note(2, "lvl{5} 2 - Note text");
    lvl.danger(9, "lvl{5} 9 - Danger text FAILED");

    let mask = MaskGate::new(0xA);
    mask.message(0x2, "mask{0xA} 0x2 - Message text");
    mask.message(0x5, "mask{0xA} 0x5 - Message text FAILED");

    logging::lvl_msg(1, "global level 1 message");
    logging::mask_msg(0x1, "global mask 0x1 message");

    logging::chk_tru!(1 > 2, "{} is not greater than {}", 1, 2);
    logging::chk_err(&"12x".parse::<u32>(), ());
    logging::trc("tour complete");
}
