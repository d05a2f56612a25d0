use super::*;
use flowcore_core::test_support::{constant_solid_def, linear_pipeline, passthrough_solid_def};
use flowcore_core::{
    Expectation, ExpectationResult, FailureReason, InputDefinition, OutputDefinition, PipelineDefinitionBuilder,
    Resources, RunId, RuntimeType, Solid, SolidDefinitionBuilder, UserError, DEFAULT_OUTPUT,
};

fn positive_number_def() -> std::sync::Arc<flowcore_core::SolidDefinition> {
    SolidDefinitionBuilder::new("doubling_def")
        .input(InputDefinition::new("in", RuntimeType::any("any")))
        .output(OutputDefinition::new(DEFAULT_OUTPUT, RuntimeType::any("any")))
        .input_expectation(
            "in",
            Expectation::new("positive", |v| {
                if v.as_i64().unwrap_or(-1) > 0 {
                    ExpectationResult::passed()
                } else {
                    ExpectationResult::failed("must be positive")
                }
            }),
        )
        .transform(|_ctx, inputs| {
            let mut out = std::collections::HashMap::new();
            out.insert(DEFAULT_OUTPUT.to_string(), serde_json::json!(inputs["in"].as_i64().unwrap_or(0) * 2));
            Ok(out)
        })
}

fn bare_context(run_id: &str) -> RuntimeExecutionContext {
    RuntimeExecutionContext {
        run_id: RunId::new(run_id),
        loggers: Vec::new(),
        resources: Resources::new(),
        tags: Default::default(),
        event_sink: None,
        original_config: RuntimeValue::Null,
    }
}

#[test]
fn runs_a_linear_pipeline_end_to_end() {
    let pipeline = linear_pipeline("p");
    let plan = create_execution_plan_core(&pipeline, None);
    let context = bare_context("run-1");

    let results = execute_plan_core(&pipeline, &context, &plan, true, None).unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(StepResult::is_success));
}

#[test]
fn subset_info_seeds_inputs_and_skips_elided_steps() {
    let pipeline = PipelineDefinitionBuilder::new("abc")
        .solid(Solid::new("a", constant_solid_def("a_def", 1)))
        .solid(Solid::new("b", passthrough_solid_def("pass_def")))
        .dependency("b", "in", "a", DEFAULT_OUTPUT)
        .build()
        .unwrap();

    let subset = SubsetInfo::new(vec!["b.transform".to_string()]).with_input("b.transform", "in", serde_json::json!(99));
    let plan = create_execution_plan_core(&pipeline, Some(&subset));
    assert!(plan.step("a.transform").is_none());

    let context = bare_context("run-1");
    let results = execute_plan_core(&pipeline, &context, &plan, true, Some(&subset)).unwrap();

    assert_eq!(results.len(), 1);
    match &results[0] {
        StepResult::Success { data, .. } => assert_eq!(data.output_values[DEFAULT_OUTPUT], serde_json::json!(99)),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn throw_on_user_error_true_propagates_the_first_failure() {
    let failing_def = SolidDefinitionBuilder::new("failing_def").transform(|_ctx, _inputs| {
        Err(UserError {
            solid: "boom".to_string(),
            message: "always fails".to_string(),
        })
    });
    let pipeline = PipelineDefinitionBuilder::new("p")
        .solid(Solid::new("boom", failing_def))
        .build()
        .unwrap();

    let plan = create_execution_plan_core(&pipeline, None);
    let context = bare_context("run-1");
    let error = execute_plan_core(&pipeline, &context, &plan, true, None).unwrap_err();
    assert_eq!(error.message, "always fails");
}

#[test]
fn a_passing_input_expectation_runs_the_predicate_and_feeds_the_transform() {
    let pipeline = PipelineDefinitionBuilder::new("p")
        .solid(Solid::new("x", positive_number_def()))
        .build()
        .unwrap();

    let subset = SubsetInfo::new(vec!["x.input_expectation".to_string(), "x.transform".to_string()])
        .with_input("x.input_expectation", "in", serde_json::json!(5));
    let plan = create_execution_plan_core(&pipeline, Some(&subset));
    let context = bare_context("run-1");

    let results = execute_plan_core(&pipeline, &context, &plan, true, Some(&subset)).unwrap();
    assert_eq!(results.len(), 2);

    let transform_result = results.iter().find(|r| r.step_key() == "x.transform").unwrap();
    match transform_result {
        StepResult::Success { data, .. } => assert_eq!(data.output_values[DEFAULT_OUTPUT], serde_json::json!(10)),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn a_failing_input_expectation_aborts_the_run_when_throw_on_user_error_is_true() {
    let pipeline = PipelineDefinitionBuilder::new("p")
        .solid(Solid::new("x", positive_number_def()))
        .build()
        .unwrap();

    let subset = SubsetInfo::new(vec!["x.input_expectation".to_string(), "x.transform".to_string()])
        .with_input("x.input_expectation", "in", serde_json::json!(-1));
    let plan = create_execution_plan_core(&pipeline, Some(&subset));
    let context = bare_context("run-1");

    let error = execute_plan_core(&pipeline, &context, &plan, true, Some(&subset)).unwrap_err();
    assert_eq!(error.solid, "x");
    assert!(error.message.contains("positive"));
}

#[test]
fn a_failing_input_expectation_is_recorded_and_the_transform_is_skipped() {
    let pipeline = PipelineDefinitionBuilder::new("p")
        .solid(Solid::new("x", positive_number_def()))
        .build()
        .unwrap();

    let subset = SubsetInfo::new(vec!["x.input_expectation".to_string(), "x.transform".to_string()])
        .with_input("x.input_expectation", "in", serde_json::json!(-1));
    let plan = create_execution_plan_core(&pipeline, Some(&subset));
    let context = bare_context("run-1");

    let results = execute_plan_core(&pipeline, &context, &plan, false, Some(&subset)).unwrap();
    assert_eq!(results.len(), 1);
    match &results[0] {
        StepResult::Failure { data, .. } => match &data.reason {
            FailureReason::ExpectationFailed { expectation_name, message } => {
                assert_eq!(expectation_name, "positive");
                assert_eq!(message, "must be positive");
            }
            other => panic!("unexpected reason: {other:?}"),
        },
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn throw_on_user_error_false_records_failure_and_skips_dependents() {
    let failing_def = SolidDefinitionBuilder::new("failing_def").transform(|_ctx, _inputs| {
        Err(UserError {
            solid: "a".to_string(),
            message: "always fails".to_string(),
        })
    });
    let pipeline = PipelineDefinitionBuilder::new("p")
        .solid(Solid::new("a", failing_def))
        .solid(Solid::new("b", passthrough_solid_def("pass_def")))
        .dependency("b", "in", "a", DEFAULT_OUTPUT)
        .build()
        .unwrap();

    let plan = create_execution_plan_core(&pipeline, None);
    let context = bare_context("run-1");
    let results = execute_plan_core(&pipeline, &context, &plan, false, None).unwrap();

    assert_eq!(results.len(), 1);
    assert!(!results[0].is_success());
}
