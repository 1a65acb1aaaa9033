use padcalc::{Config, Engine};
use pretty_assertions::assert_eq;

fn press_all(engine: &mut Engine, keys: &str) -> String {
    for label in keys.split_whitespace() {
        engine.press(label).unwrap();
    }
    engine.display().to_string()
}

fn run(keys: &str) -> String {
    press_all(&mut Engine::new(), keys)
}

#[test]
fn test_decimal_point_once_per_number() {
    assert_eq!(run("1 2 . 5 ."), "12.5");
}

#[test]
fn test_multiplication_with_keypad_symbols() {
    assert_eq!(run("7 × 8 ="), "56");
    assert_eq!(run("9 ÷ 4 ="), "2.25");
    assert_eq!(run("2 − 5 ="), "-3");
}

#[test]
fn test_division_by_zero_clears_buffer() {
    let mut engine = Engine::new();
    assert_eq!(press_all(&mut engine, "1 ÷ 0 ="), "Error: Division by zero");
    assert_eq!(engine.buffer(), "");
    assert!(engine.just_evaluated());
    assert!(engine.is_error());

    assert_eq!(press_all(&mut engine, "4"), "4");
    assert!(!engine.is_error());
}

#[test]
fn test_memory_store_add_recall() {
    let mut engine = Engine::new();
    assert_eq!(press_all(&mut engine, "5 MS C 3 M+ MR"), "8");
    assert_eq!(engine.memory(), 8.0);
}

#[test]
fn test_function_key_opens_call() {
    assert_eq!(run("sqrt 2 5 ) ="), "5");
    assert_eq!(run("2 sqrt 9 ) ="), "6");
}

#[test]
fn test_repeated_evaluate_is_stable() {
    let mut engine = Engine::new();
    let first = press_all(&mut engine, "1 + 2 × 3 =");
    assert_eq!(first, "7");
    assert_eq!(press_all(&mut engine, "="), first);
}

#[test]
fn test_result_feeds_next_operation() {
    assert_eq!(run("6 × 7 = + 1 ="), "43");
    assert_eq!(run("6 × 7 = 1 ="), "1");
}

#[test]
fn test_domain_errors_share_one_message() {
    assert_eq!(run("log 0 ) ="), "Error: Math domain/type");
    assert_eq!(run("sqrt − 1 ) ="), "Error: Math domain/type");
}

#[test]
fn test_malformed_expression() {
    assert_eq!(run("( 1 + ="), "Error: Invalid syntax");
}

#[test]
fn test_configured_precision() {
    let config = Config::parse("precision = 4").unwrap();
    let mut engine = Engine::with_config(&config);
    assert_eq!(press_all(&mut engine, "2 ÷ 3 ="), "0.6667");
}

#[test]
fn test_physical_constants_are_opt_in() {
    assert!(Engine::new().press("c").is_err());

    let config = Config::parse("physical_constants = true").unwrap();
    let mut engine = Engine::with_config(&config);
    assert_eq!(press_all(&mut engine, "c ="), "299792458");
}
