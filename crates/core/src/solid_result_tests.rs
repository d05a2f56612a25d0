use super::*;
use crate::solid::{InputDefinition, OutputDefinition, SolidDefinitionBuilder, UserError, DEFAULT_OUTPUT};
use crate::runtime_type::RuntimeType;
use std::collections::HashMap;

fn def_with_in_and_out() -> Arc<SolidDefinition> {
    SolidDefinitionBuilder::new("a_def")
        .input(InputDefinition::new("in", RuntimeType::any("any")))
        .output(OutputDefinition::new(DEFAULT_OUTPUT, RuntimeType::any("any")))
        .transform(|_ctx, _inputs| Ok(Default::default()))
}

#[test]
fn success_when_every_step_succeeds() {
    let mut outputs = HashMap::new();
    outputs.insert(DEFAULT_OUTPUT.to_string(), serde_json::json!(5));
    let result = SolidExecutionResult::from_results(
        "a",
        vec![StepResult::success("a.transform", "a", outputs)],
        def_with_in_and_out(),
    );

    assert!(result.success());
    assert_eq!(result.transformed_value(DEFAULT_OUTPUT).unwrap(), Some(serde_json::json!(5)));
}

#[test]
fn failure_when_any_step_fails() {
    let mut outputs = HashMap::new();
    outputs.insert("in".to_string(), serde_json::json!(1));
    let error = UserError {
        solid: "a".to_string(),
        message: "boom".to_string(),
    };
    let result = SolidExecutionResult::from_results(
        "a",
        vec![
            StepResult::success("a.input_expectation", "a", outputs),
            StepResult::user_failure("a.transform", "a", error),
        ],
        def_with_in_and_out(),
    );

    assert!(!result.success());
    assert_eq!(result.transformed_values().len(), 0);
    assert_eq!(result.transformed_value(DEFAULT_OUTPUT).unwrap(), None);
}

#[test]
fn transformed_value_fails_with_invariant_violation_for_an_undeclared_output() {
    let mut outputs = HashMap::new();
    outputs.insert(DEFAULT_OUTPUT.to_string(), serde_json::json!(5));
    let result = SolidExecutionResult::from_results(
        "a",
        vec![StepResult::success("a.transform", "a", outputs)],
        def_with_in_and_out(),
    );

    assert!(matches!(result.transformed_value("not_declared"), Err(CoreError::InvariantViolation(_))));
}

#[test]
fn transformed_values_ignores_expectation_steps() {
    let mut input_outputs = HashMap::new();
    input_outputs.insert("in".to_string(), serde_json::json!(1));
    let mut transform_outputs = HashMap::new();
    transform_outputs.insert(DEFAULT_OUTPUT.to_string(), serde_json::json!(2));

    let result = SolidExecutionResult::from_results(
        "a",
        vec![
            StepResult::success("a.input_expectation", "a", input_outputs),
            StepResult::success("a.transform", "a", transform_outputs),
        ],
        def_with_in_and_out(),
    );

    let values = result.transformed_values();
    assert_eq!(values.len(), 1);
    assert_eq!(values.get(DEFAULT_OUTPUT), Some(&serde_json::json!(2)));
}
