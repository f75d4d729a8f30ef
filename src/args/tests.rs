use clap::Parser;

use super::LoadArgs;
use crate::args::OutputFormat;

fn parse_args(argv: &[&str]) -> Result<LoadArgs, String> {
    LoadArgs::try_parse_from(argv).map_err(|err| format!("parse failed: {}", err))
}

fn expect_rejected(argv: &[&str], label: &str) -> Result<(), String> {
    match parse_args(argv) {
        Ok(_) => Err(format!("{} was accepted", label)),
        Err(_) => Ok(()),
    }
}

#[test]
fn parses_required_options() -> Result<(), String> {
    let args = parse_args(&[
        "loadlite", "-u", "100", "-t", "10", "-d", "60", "-r", "100",
    ])?;
    if args.users.get() != 100 {
        return Err(format!("expected 100 users, got {}", args.users.get()));
    }
    if args.threads.get() != 10 {
        return Err(format!("expected 10 threads, got {}", args.threads.get()));
    }
    if args.duration.get() != 60 {
        return Err(format!("expected 60s duration, got {}", args.duration.get()));
    }
    if args.delay != 100 {
        return Err(format!("expected 100ms delay, got {}", args.delay));
    }
    Ok(())
}

#[test]
fn delay_defaults_to_zero() -> Result<(), String> {
    let args = parse_args(&["loadlite", "-u", "1", "-t", "1", "-d", "1"])?;
    if args.delay != 0 {
        return Err(format!("expected default delay 0, got {}", args.delay));
    }
    if args.curl_file != "curl.txt" {
        return Err(format!(
            "expected default curl file curl.txt, got {}",
            args.curl_file
        ));
    }
    Ok(())
}

#[test]
fn rejects_zero_users() -> Result<(), String> {
    expect_rejected(&["loadlite", "-u", "0", "-t", "1", "-d", "1"], "zero users")
}

#[test]
fn rejects_zero_duration() -> Result<(), String> {
    expect_rejected(
        &["loadlite", "-u", "1", "-t", "1", "-d", "0"],
        "zero duration",
    )
}

#[test]
fn rejects_negative_delay() -> Result<(), String> {
    expect_rejected(
        &["loadlite", "-u", "1", "-t", "1", "-d", "1", "-r", "-5"],
        "negative delay",
    )
}

#[test]
fn rejects_missing_duration() -> Result<(), String> {
    expect_rejected(&["loadlite", "-u", "1", "-t", "1"], "missing duration")
}

#[test]
fn parses_output_format() -> Result<(), String> {
    let args = parse_args(&[
        "loadlite",
        "-u",
        "1",
        "-t",
        "1",
        "-d",
        "1",
        "--output-format",
        "json",
    ])?;
    if args.output_format != OutputFormat::Json {
        return Err("expected json output format".to_owned());
    }
    Ok(())
}
