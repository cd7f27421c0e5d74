//! Subcommand handlers. Each one reads its inputs, calls straight into an
//! engine crate, and prints the result as pretty JSON.

use csvimport_parser::ParserOptions;

use crate::cli::{CsvSourceArgs, ImportArgs, MapArgs, ParseArgs, ValidateArgs};
use crate::schema_file::load_schema;

fn parser_options(source: &CsvSourceArgs) -> ParserOptions {
    ParserOptions {
        delimiter: source.delimiter as u8,
        quote: source.quote as u8,
        header: source.header,
        skip_empty_lines: source.skip_empty_lines,
    }
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn run_parse(args: &ParseArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.source.csv_file)?;
    let options = parser_options(&args.source);

    // Dispatched through the worker transport rather than called in-process,
    // so a single CLI invocation exercises the same path a long-lived host
    // would use to keep this off its own thread.
    let worker = csvimport_worker::WorkerHandle::spawn();
    let response = worker.send(csvimport_worker::RequestPayload::Parse(csvimport_worker::ParseRequest {
        text,
        options,
    }))?;
    let matrix = match response {
        csvimport_worker::ResponsePayload::Parsed(matrix) => matrix,
        other => anyhow::bail!("unexpected worker response for a parse request: {other:?}"),
    };

    tracing::info!(rows = matrix.row_count, fields = matrix.field_count, "parsed csv file");
    print_json(&serde_json::to_value(matrix)?)
}

pub fn run_map(args: &MapArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.source.csv_file)?;
    let options = parser_options(&args.source);
    let matrix = csvimport_parser::parse(&text, &options);
    let headers = matrix.headers.clone().unwrap_or_default();

    let schema = load_schema(&args.schema.schema_file)?;
    let mapping = csvimport_map::map_columns(&headers, &schema, args.fuzzy_threshold);
    tracing::info!(
        auto_mapped = mapping.auto_mapped,
        needs_review = mapping.needs_review,
        unmapped = mapping.unmapped,
        "mapped csv headers onto schema"
    );
    print_json(&serde_json::to_value(mapping)?)
}

pub fn run_validate(args: &ValidateArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.source.csv_file)?;
    let options = parser_options(&args.source);
    let matrix = csvimport_parser::parse(&text, &options);
    let headers = matrix.headers.clone().unwrap_or_default();

    let schema = load_schema(&args.schema.schema_file)?;
    let mapping = csvimport_map::map_columns(&headers, &schema, args.fuzzy_threshold);
    let applied = csvimport_validate::apply_mapping(&matrix.rows, &mapping, &schema, false);

    let registry = csvimport_locale::global();
    let outcome = csvimport_validate::validate_auto(&applied, &schema, registry);
    let stats = outcome.stats();
    tracing::info!(
        error_rows = stats.error_rows,
        total_rows = stats.total_rows,
        "validated csv rows"
    );
    print_json(&serde_json::to_value(outcome.into_result())?)
}

pub fn run_import(args: &ImportArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.source.csv_file)?;
    let options = parser_options(&args.source);
    let matrix = csvimport_parser::parse(&text, &options);
    let headers = matrix.headers.clone().unwrap_or_default();

    let schema = load_schema(&args.schema.schema_file)?;
    let mapping = csvimport_map::map_columns(&headers, &schema, args.fuzzy_threshold);

    let state = csvimport_core::create_initial_state();
    let state = csvimport_core::importer_reducer(
        &state,
        csvimport_core::ImporterAction::LoadString { text: text.clone() },
    );
    let state = csvimport_core::importer_reducer(
        &state,
        csvimport_core::ImporterAction::ParseComplete { matrix: matrix.clone() },
    );
    let state = csvimport_core::importer_reducer(
        &state,
        csvimport_core::ImporterAction::SetMapping { mapping: mapping.clone() },
    );
    let state = csvimport_core::importer_reducer(&state, csvimport_core::ImporterAction::ConfirmMapping);

    let applied = csvimport_validate::apply_mapping(&matrix.rows, &mapping, &schema, false);
    let registry = csvimport_locale::global();
    let validation = csvimport_validate::validate_auto(&applied, &schema, registry).into_result();

    let state = csvimport_core::importer_reducer(
        &state,
        csvimport_core::ImporterAction::ValidateComplete { result: validation.clone() },
    );

    let import_result = csvimport_core::build_import_result(&state, &schema);
    tracing::info!(
        step = ?state.step,
        error_rows = validation.stats.error_rows,
        "completed import pipeline"
    );

    let output = match import_result {
        Some(result) => serde_json::json!({
            "headers": result.headers,
            "rows": result.rows,
            "mapping": result.mapping,
            "validation": result.validation,
        }),
        None => serde_json::json!({ "error": "import result unavailable before the review step" }),
    };
    print_json(&output)
}
