use csvimport_model::{ColumnDef, ColumnType, Rule, Schema};
use csvimport_parser::ParserOptions;
use csvimport_worker::{ParseAndValidateRequest, RequestPayload, ResponsePayload, ValidateRequest, WorkerHandle};

#[test]
fn validate_request_runs_the_same_rules_as_the_validate_crate() {
    let worker = WorkerHandle::spawn();
    let schema = Schema::new().with_column("id", ColumnDef::new(ColumnType::String).with_rule(Rule::Required));
    let rows = vec![vec!["x".to_string()], vec![String::new()]];

    let response = worker
        .send(RequestPayload::Validate(ValidateRequest { rows, schema }))
        .expect("validate succeeds");

    match response {
        ResponsePayload::Validated(result) => {
            assert_eq!(result.stats().error_rows, 1);
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn parse_and_validate_in_one_round_trip() {
    let worker = WorkerHandle::spawn();
    let schema = Schema::new().with_column("age", ColumnDef::new(ColumnType::Integer).with_rule(Rule::Min(18.0)));

    let response = worker
        .send(RequestPayload::ParseAndValidate(ParseAndValidateRequest {
            text: "age\n12\n40".to_string(),
            options: ParserOptions::default(),
            schema,
        }))
        .expect("dispatch succeeds");

    match response {
        ResponsePayload::ParsedAndValidated { matrix, validation } => {
            assert_eq!(matrix.row_count, 2);
            assert_eq!(validation.stats().error_rows, 1);
        }
        other => panic!("unexpected response: {other:?}"),
    }
}
