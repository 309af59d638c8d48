// SPDX-License-Identifier: MIT

use super::*;
use yare::parameterized;

const DAY: Duration = Duration::from_secs(86_400);

fn eval(raw: &str, file: &File) -> Result<bool, EvalError> {
    Condition::parse(raw).unwrap().evaluate(file)
}

fn log_file() -> File {
    // tmp_server.log, 2048 bytes, ten days old
    File::fake("tmp_server", "log", DAY.saturating_mul(10), 2048)
}

#[parameterized(
    eq_matches = { "extension = log", true },
    eq_is_case_sensitive = { "extension = LOG", false },
    eq_is_exact = { "extension = lo", false },
    neq = { "extension != txt", true },
    neq_matching = { "extension != log", false },
    starts_with = { "name ^= tmp_", true },
    starts_with_miss = { "name ^= srv_", false },
    not_starts_with = { "name !^= srv_", true },
    ends_with = { "name $= _server", true },
    ends_with_miss = { "name $= _client", false },
    not_ends_with = { "name !$= _client", true },
    contains = { "name ?= serv", true },
    contains_miss = { "name ?= nginx", false },
    not_contains = { "name !?= nginx", true },
)]
fn string_operators(raw: &str, expected: bool) {
    assert_eq!(eval(raw, &log_file()).unwrap(), expected);
}

#[test]
fn extension_equality_is_case_sensitive_and_exact() {
    let txt = File::fake("notes", "txt", Duration::ZERO, 10);
    assert!(eval("extension = txt", &txt).unwrap());
    assert!(!eval("extension = TXT", &txt).unwrap());
    assert!(!eval("extension = text", &txt).unwrap());
}

#[parameterized(
    over = { "size > 1000", true },
    under = { "size > 4096", false },
    less_than = { "size < 4096", true },
    at_least_exact = { "size >= 2048", true },
    at_most = { "size <= 2047", false },
    fractional_literal = { "size > 2047.5", true },
)]
fn size_comparisons(raw: &str, expected: bool) {
    assert_eq!(eval(raw, &log_file()).unwrap(), expected);
}

#[test]
fn size_literal_must_be_numeric() {
    assert!(matches!(
        eval("size > banana", &log_file()),
        Err(EvalError::InvalidNumber(v)) if v == "banana"
    ));
}

#[parameterized(
    over_thirty_days = { "age > 30d", 31, true },
    under_thirty_days = { "age > 30d", 29, false },
    under_in_hours = { "age < 720h", 29, true },
    at_least = { "age >= 10d", 10, true },
)]
fn age_comparisons(raw: &str, age_days: u32, expected: bool) {
    let file = File::fake("old", "log", DAY.saturating_mul(age_days), 0);
    assert_eq!(eval(raw, &file).unwrap(), expected);
}

#[test]
fn day_unit_equals_twenty_four_hours() {
    // "2d" and "48h" must be indistinguishable on either side of 48h.
    let just_over = File::fake("f", "", DAY.saturating_mul(2) + Duration::from_secs(1), 0);
    let just_under = File::fake("f", "", DAY.saturating_mul(2) - Duration::from_secs(1), 0);

    for file in [&just_over, &just_under] {
        assert_eq!(
            eval("age > 2d", file).unwrap(),
            eval("age > 48h", file).unwrap()
        );
    }
    assert!(eval("age > 2d", &just_over).unwrap());
    assert!(!eval("age > 2d", &just_under).unwrap());
}

#[test]
fn fractional_duration_literal_is_accepted() {
    let ninety_minutes = File::fake("f", "", Duration::from_secs(90 * 60), 0);
    assert!(!eval("age > 1.5h", &ninety_minutes).unwrap());
    assert!(eval("age >= 1.5h", &ninety_minutes).unwrap());
}

#[test]
fn malformed_age_literal_evaluates_to_false() {
    let file = File::fake("f", "", DAY, 0);
    assert!(!eval("age > banana", &file).unwrap());
    assert!(!eval("age > 30", &file).unwrap());
    assert!(!eval("age < banana", &file).unwrap());
}

#[parameterized(
    relational_on_text = { "name > 5" },
    prefix_on_size = { "size ^= 20" },
    contains_on_age = { "age ?= 3" },
)]
fn mismatched_operator_and_field_is_unsupported(raw: &str) {
    assert!(matches!(
        eval(raw, &log_file()),
        Err(EvalError::UnsupportedOperator { .. })
    ));
}

#[test]
fn equality_on_numeric_fields_is_vacuous() {
    let file = log_file();
    // Equality against the raw literal never holds for size or age, and
    // inequality therefore always does.
    assert!(!eval("size = 2048", &file).unwrap());
    assert!(eval("size != 2048", &file).unwrap());
    assert!(!eval("age = 10d", &file).unwrap());
    assert!(eval("age != 10d", &file).unwrap());
}

#[parameterized(
    created = { "created > 5m" },
    modified = { "modified > 5m" },
    file_type = { "type = file" },
)]
fn unimplemented_field_lookup_fails_recoverably(raw: &str) {
    assert!(matches!(
        eval(raw, &log_file()),
        Err(EvalError::Field(FieldError::Unimplemented(_)))
    ));
}

#[test]
fn tmp_log_join_matches_only_the_right_shape() {
    let matching = File::fake("tmp_server", "log", Duration::ZERO, 0);
    let wrong_name = File::fake("server_tmp", "log", Duration::ZERO, 0);

    let raw = "(name ^= tmp_ and extension = log)";
    assert!(eval(raw, &matching).unwrap());
    assert!(!eval(raw, &wrong_name).unwrap());
}

#[parameterized(
    both = { true, true, true, true, false },
    left_only = { true, false, false, true, true },
    right_only = { false, true, false, true, true },
    neither = { false, false, false, false, false },
)]
fn join_truth_table(left: bool, right: bool, and: bool, or: bool, xor: bool) {
    // A: name = foo, B: extension = log
    let name = if left { "foo" } else { "bar" };
    let extension = if right { "log" } else { "txt" };
    let file = File::fake(name, extension, Duration::ZERO, 0);

    assert_eq!(eval("(name = foo and extension = log)", &file).unwrap(), and);
    assert_eq!(eval("(name = foo or extension = log)", &file).unwrap(), or);
    assert_eq!(eval("(name = foo xor extension = log)", &file).unwrap(), xor);
}

#[test]
fn join_right_child_is_evaluated_even_when_left_decides() {
    // No short-circuit: the failing right child surfaces even though the
    // left child alone would decide an `and`.
    let file = log_file();
    assert!(matches!(
        eval("(name = nope and created > 5m)", &file),
        Err(EvalError::Field(_))
    ));
}

#[test]
fn join_left_failure_propagates_before_right_is_touched() {
    let file = log_file();
    assert!(matches!(
        eval("(created > 5m and size ^= 2)", &file),
        Err(EvalError::Field(_))
    ));
}

#[test]
fn nested_joins_evaluate() {
    let stale = File::fake("report", "pdf", DAY.saturating_mul(40), 100);
    let fresh_tmp = File::fake("tmp_cache", "log", Duration::ZERO, 100);
    let fresh_other = File::fake("report", "pdf", Duration::ZERO, 100);

    let raw = "((name ^= tmp_ and extension = log) or age > 30d)";
    assert!(eval(raw, &stale).unwrap());
    assert!(eval(raw, &fresh_tmp).unwrap());
    assert!(!eval(raw, &fresh_other).unwrap());
}

mod duration_literals {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        days = { "30d", 30 * 86_400 },
        hours = { "48h", 48 * 3600 },
        minutes = { "90m", 90 * 60 },
        seconds = { "45s", 45 },
    )]
    fn parses_whole_units(literal: &str, seconds: u64) {
        assert_eq!(
            parse_duration_literal(literal),
            Some(Duration::from_secs(seconds))
        );
    }

    #[test]
    fn parses_fractional_units() {
        assert_eq!(
            parse_duration_literal("1.5h"),
            Some(Duration::from_secs(5400))
        );
        assert_eq!(
            parse_duration_literal("0.5d"),
            Some(Duration::from_secs(43_200))
        );
    }

    #[parameterized(
        garbage = { "banana" },
        missing_unit = { "30" },
        negative = { "-5h" },
        empty = { "" },
    )]
    fn rejects_malformed(literal: &str) {
        assert_eq!(parse_duration_literal(literal), None);
    }
}

mod roundtrip {
    use super::*;
    use proptest::prelude::*;

    fn arb_field() -> impl Strategy<Value = Field> {
        prop_oneof![
            Just(Field::Extension),
            Just(Field::Name),
            Just(Field::Created),
            Just(Field::Modified),
            Just(Field::Type),
            Just(Field::Size),
            Just(Field::Age),
            Just(Field::Path),
        ]
    }

    fn arb_operator() -> impl Strategy<Value = Operator> {
        prop_oneof![
            Just(Operator::Eq),
            Just(Operator::Neq),
            Just(Operator::Lt),
            Just(Operator::Gt),
            Just(Operator::Leq),
            Just(Operator::Geq),
            Just(Operator::StartsWith),
            Just(Operator::NotStartsWith),
            Just(Operator::EndsWith),
            Just(Operator::NotEndsWith),
            Just(Operator::Contains),
            Just(Operator::NotContains),
        ]
    }

    fn arb_bool_op() -> impl Strategy<Value = BoolOperator> {
        prop_oneof![
            Just(BoolOperator::And),
            Just(BoolOperator::Or),
            Just(BoolOperator::Xor),
        ]
    }

    fn arb_condition() -> impl Strategy<Value = Condition> {
        let leaf = (arb_field(), arb_operator(), "[a-z0-9._]{1,12}").prop_map(
            |(field, op, value)| Condition::Compare { field, op, value },
        );
        leaf.prop_recursive(4, 32, 2, |inner| {
            (inner.clone(), arb_bool_op(), inner).prop_map(|(left, op, right)| {
                Condition::Join {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                }
            })
        })
    }

    proptest! {
        #[test]
        fn display_then_reparse_is_identity(condition in arb_condition()) {
            let printed = condition.to_string();
            let reparsed = Condition::parse(&printed).unwrap();
            prop_assert_eq!(reparsed, condition);
        }
    }

    #[test]
    fn display_uses_source_syntax() {
        let raw = "((name ^= tmp_ and extension = log) or age > 30d)";
        let condition = Condition::parse(raw).unwrap();
        assert_eq!(condition.to_string(), raw);
    }
}
