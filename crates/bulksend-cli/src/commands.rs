use anyhow::{Context, Result};
use bulksend_map::MatchOptions;
use bulksend_model::ParamCounts;
use bulksend_transform::TransformOptions;
use tracing::info;

use bulksend_cli::pipeline::{
    load_csv, load_profile, load_template, parse_custom_fields, render_preview, run_matching,
    run_transform, target_fields, write_json,
};
use bulksend_cli::summary::{
    issue_table, mapping_table, row_error_table, suggestion_table, transform_summary_table,
};

use crate::cli::{MapArgs, PreviewArgs, ReportFormatArg, TransformArgs};

/// Runs `map`. Returns true when a required field is left unmapped.
pub fn run_map(args: &MapArgs) -> Result<bool> {
    let table = load_csv(&args.csv)?;
    let param_counts = match &args.template {
        Some(path) => load_template(path)?.param_counts(),
        None => ParamCounts::new(args.header, args.body, args.button),
    };
    let fields = target_fields(parse_custom_fields(&args.custom)?);
    let options = match_options(args);
    info!(
        columns = table.headers.len(),
        rows = table.row_count(),
        slots = param_counts.total(),
        "matching columns"
    );

    let report = run_matching(&table, &fields, param_counts, &options);

    if let Some(path) = &args.save {
        write_json(&report.to_profile(&fields), Some(path))?;
    }

    match args.format {
        ReportFormatArg::Json => write_json(&report, None)?,
        ReportFormatArg::Table => {
            println!("{}", mapping_table(&report, &fields));
            if let Some(suggestions) = suggestion_table(&report.result) {
                println!();
                println!("Suggestions (below confidence cutoff):");
                println!("{suggestions}");
            }
            if !report.unused_columns.is_empty() {
                println!();
                println!("Unused columns: {}", report.unused_columns.join(", "));
            }
            if let Some(path) = &args.save {
                println!();
                println!("Mapping saved to {}", path.display());
            }
        }
    }
    Ok(!report.missing_required.is_empty())
}

fn match_options(args: &MapArgs) -> MatchOptions {
    let mut options = if args.strict {
        MatchOptions::strict()
    } else if args.relaxed {
        MatchOptions::relaxed()
    } else {
        MatchOptions::default()
    };
    if args.no_fuzzy {
        options = options.with_fuzzy_matching(false);
    }
    if args.no_prioritize_required {
        options = options.with_prioritize_required(false);
    }
    if let Some(score) = args.min_confidence {
        options = options.with_min_confidence(score);
    }
    options
}

/// Runs `transform`. Returns true when pre-flight or row errors were found.
///
/// Tables go to stderr when the payload is written to stdout.
pub fn run_transform_command(args: &TransformArgs) -> Result<bool> {
    let table = load_csv(&args.csv)?;
    let profile = load_profile(&args.mapping)?;
    let options = TransformOptions::default()
        .with_validate_phone(!args.no_validate_phone)
        .with_validate_params(!args.no_validate_params)
        .with_skip_invalid_rows(args.skip_invalid);

    let report = run_transform(&table, &profile, &options);
    let to_stderr = args.output.is_none();
    let show = |text: String| {
        if to_stderr {
            eprintln!("{text}");
        } else {
            println!("{text}");
        }
    };

    if let Some(issues) = issue_table(&report.validation) {
        show("Mapping check:".to_string());
        show(issues.to_string());
    }
    let Some(result) = &report.result else {
        show("Mapping has errors; no rows were transformed.".to_string());
        return Ok(true);
    };

    show(transform_summary_table(result, table.row_count()).to_string());
    if let Some(errors) = row_error_table(&result.errors) {
        show("Row errors:".to_string());
        show(errors.to_string());
    }

    let payload = result.clone().into_payload(args.template_id.clone());
    write_json(&payload, args.output.as_deref()).context("write payload")?;
    if let Some(path) = &args.output {
        show(format!(
            "Wrote {} recipients to {}",
            payload.recipients.len(),
            path.display()
        ));
    }
    Ok(report.has_errors())
}

pub fn run_preview(args: &PreviewArgs) -> Result<()> {
    let template = load_template(&args.template)?;
    println!("{}", render_preview(&template, &args.params, args.named)?);
    Ok(())
}
