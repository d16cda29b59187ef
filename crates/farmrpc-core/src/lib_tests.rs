#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// LogLevel tests

#[test]
fn LogLevel___ordering___is_ascending_by_severity() {
    assert!(LogLevel::Trace < LogLevel::Debug);
    assert!(LogLevel::Debug < LogLevel::Info);
    assert!(LogLevel::Info < LogLevel::Warn);
    assert!(LogLevel::Warn < LogLevel::Error);
    assert!(LogLevel::Error < LogLevel::Off);
}

#[test_case(0, LogLevel::Trace)]
#[test_case(2, LogLevel::Info)]
#[test_case(4, LogLevel::Error)]
#[test_case(5, LogLevel::Off)]
#[test_case(100, LogLevel::Off)]
fn LogLevel___from_u8___maps_value(value: u8, expected: LogLevel) {
    assert_eq!(LogLevel::from_u8(value), expected);
}

#[test_case("trace", LogLevel::Trace)]
#[test_case("DEBUG", LogLevel::Debug)]
#[test_case("info", LogLevel::Info)]
#[test_case("warning", LogLevel::Warn)]
#[test_case("Error", LogLevel::Error)]
#[test_case("off", LogLevel::Off)]
fn LogLevel___from_str___parses_case_insensitively(name: &str, expected: LogLevel) {
    assert_eq!(name.parse::<LogLevel>().unwrap(), expected);
}

#[test]
fn LogLevel___from_str___rejects_unknown_name() {
    let result = "loud".parse::<LogLevel>();

    assert!(result.unwrap_err().contains("loud"));
}

#[test]
fn LogLevel___display___shows_uppercase() {
    assert_eq!(LogLevel::Warn.to_string(), "WARN");
}
