use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::ScoreArgs;
use crate::model::{ClassMetricRow, MetricRow, ScoreReport};
use crate::scoring::{
    ClassScores, ConfusionCounts, ConfusionTriple, CountMode, LabelInput, LabelVocabulary,
    MetricResult, Record, ScoreError, ScoredDataset, count, jaccard_index, precision_recall,
    validate,
};
use crate::util::{ensure_directory, now_utc_string, write_json_pretty};

const EXPECTED_HEADER: [&str; 2] = ["id", "labels"];
const MIN_RECORD_FIELDS: usize = 2;
const REPORT_VERSION: u32 = 1;

pub fn run(args: ScoreArgs) -> Result<()> {
    let catalog = load_catalog(&args)?;
    let vocabulary = LabelVocabulary::build(catalog)?;

    let solution = read_dataset(&args.solution)?;
    let prediction = read_dataset(&args.predictions)?;

    info!(
        solution = %args.solution.display(),
        predictions = %args.predictions.display(),
        solution_records = solution.len(),
        prediction_records = prediction.len(),
        class_count = vocabulary.len(),
        "datasets loaded"
    );

    validate(&solution, &prediction, &vocabulary)?;

    let report = score(&solution, &prediction, &vocabulary)?;

    info!(
        records = report.record_count,
        precision = report.aggregate.precision,
        recall = report.aggregate.recall,
        f1 = report.aggregate.f1,
        jaccard = report.jaccard_index,
        "scoring completed"
    );

    emit_report(&report, &args)
}

/// Runs the scoring pipeline on already-validated datasets: binarize,
/// count confusions (aggregate and per class), derive metrics, and
/// compute the micro-averaged Jaccard index from the same matrices.
fn score(
    solution: &ScoredDataset,
    prediction: &ScoredDataset,
    vocabulary: &LabelVocabulary,
) -> Result<ScoreReport> {
    let solution_matrix = vocabulary.encode_batch(&solution.label_inputs())?;
    let prediction_matrix = vocabulary.encode_batch(&prediction.label_inputs())?;

    let overall = precision_recall(
        &count(&prediction_matrix, &solution_matrix, CountMode::Aggregate)?,
        true,
    );

    // A zero-record dataset has no rows to derive the class count from;
    // the report still carries one row per vocabulary class.
    let mut per_class_counts = count(&prediction_matrix, &solution_matrix, CountMode::PerClass)?;
    if let ConfusionCounts::PerClass(triples) = &mut per_class_counts {
        if triples.is_empty() {
            triples.resize(vocabulary.len(), ConfusionTriple::default());
        }
    }
    let per_class = precision_recall(&per_class_counts, true);
    let jaccard = jaccard_index(&solution_matrix, &prediction_matrix)?;

    let MetricResult::Aggregate(aggregate) = overall else {
        bail!("aggregate counting produced per-class scores");
    };
    let MetricResult::PerClass(class_scores) = per_class else {
        bail!("per-class counting produced aggregate scores");
    };

    Ok(ScoreReport {
        report_version: REPORT_VERSION,
        generated_at: now_utc_string(),
        record_count: solution.len(),
        class_count: vocabulary.len(),
        jaccard_index: jaccard,
        aggregate: metric_row(&aggregate),
        per_class: vocabulary
            .classes()
            .iter()
            .zip(&class_scores)
            .map(|(class, scores)| {
                let row = metric_row(scores);
                ClassMetricRow {
                    class: class.clone(),
                    precision: row.precision,
                    recall: row.recall,
                    f1: row.f1,
                }
            })
            .collect(),
    })
}

fn metric_row(scores: &ClassScores) -> MetricRow {
    MetricRow {
        precision: scores.precision,
        recall: scores.recall,
        f1: scores.f1.unwrap_or_default(),
    }
}

fn load_catalog(args: &ScoreArgs) -> Result<Vec<String>> {
    let mut catalog = args.classes.clone();

    if let Some(path) = &args.classes_file {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read classes file: {}", path.display()))?;
        catalog.extend(parse_catalog(&raw));
    }

    if catalog.is_empty() {
        bail!("no class catalog given; pass --class or --classes-file");
    }

    Ok(catalog)
}

fn parse_catalog(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect()
}

fn read_dataset(path: &Path) -> Result<ScoredDataset> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    parse_records(file).with_context(|| format!("failed to parse {}", path.display()))
}

/// Parses `id,label[,label...]` rows. An optional `id,labels` header row
/// is consumed; a row that starts with `id` but differs otherwise is a
/// fatal parse error. The labels cell(s) may be empty, which yields an
/// empty label set for the record.
fn parse_records<R: io::Read>(reader: R) -> Result<ScoredDataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (row_index, row) in csv_reader.records().enumerate() {
        let row = row.with_context(|| format!("failed to read csv record {}", row_index + 1))?;
        let line = row.position().map_or(row_index as u64 + 1, |p| p.line());

        if row_index == 0 && is_header(&row)? {
            continue;
        }

        if row.len() < MIN_RECORD_FIELDS {
            return Err(ScoreError::MalformedRecord {
                line,
                found: row.len(),
                expected: MIN_RECORD_FIELDS,
            }
            .into());
        }

        let id = row.get(0).unwrap_or_default().trim().to_string();
        let labels: Vec<String> = row
            .iter()
            .skip(1)
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(ToString::to_string)
            .collect();

        records.push(Record {
            id,
            labels: LabelInput::Multi(labels),
        });
    }

    Ok(ScoredDataset::new(records))
}

fn is_header(row: &csv::StringRecord) -> Result<bool> {
    let first = row.get(0).unwrap_or_default().trim();
    if !first.eq_ignore_ascii_case(EXPECTED_HEADER[0]) {
        return Ok(false);
    }

    let fields: Vec<String> = row
        .iter()
        .map(|field| field.trim().to_ascii_lowercase())
        .collect();
    if fields.iter().map(String::as_str).eq(EXPECTED_HEADER) {
        Ok(true)
    } else {
        bail!(
            "unexpected header row: expected `{}`, found `{}`",
            EXPECTED_HEADER.join(","),
            fields.join(",")
        );
    }
}

fn emit_report(report: &ScoreReport, args: &ScoreArgs) -> Result<()> {
    match (&args.output_file, args.json) {
        (Some(path), true) => {
            write_json_pretty(path, report)?;
            info!(path = %path.display(), "wrote json report");
        }
        (Some(path), false) => {
            write_csv_report(path, report)?;
            info!(path = %path.display(), "wrote csv report");
        }
        (None, true) => write_json_stdout(report)?,
        (None, false) => write_table(report)?,
    }

    Ok(())
}

fn write_csv_report(path: &Path, report: &ScoreReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create csv report: {}", path.display()))?;

    writer.write_record(["class", "precision", "recall", "f1"])?;
    for row in &report.per_class {
        writer.write_record([
            row.class.as_str(),
            &row.precision.to_string(),
            &row.recall.to_string(),
            &row.f1.to_string(),
        ])?;
    }
    writer.write_record([
        "Overall",
        &report.aggregate.precision.to_string(),
        &report.aggregate.recall.to_string(),
        &report.aggregate.f1.to_string(),
    ])?;
    writer
        .flush()
        .with_context(|| format!("failed to flush csv report: {}", path.display()))?;

    Ok(())
}

fn write_json_stdout(report: &ScoreReport) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, report)
        .context("failed to serialize score report")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn write_table(report: &ScoreReport) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    let width = report
        .per_class
        .iter()
        .map(|row| row.class.len())
        .chain(["Overall".len()])
        .max()
        .unwrap_or_default();

    writeln!(
        output,
        "{:<width$}  {:>9}  {:>9}  {:>9}",
        "class", "precision", "recall", "f1"
    )?;
    for row in &report.per_class {
        writeln!(
            output,
            "{:<width$}  {:>9.4}  {:>9.4}  {:>9.4}",
            row.class, row.precision, row.recall, row.f1
        )?;
    }
    writeln!(
        output,
        "{:<width$}  {:>9.4}  {:>9.4}  {:>9.4}",
        "Overall", report.aggregate.precision, report.aggregate.recall, report.aggregate.f1
    )?;
    writeln!(output, "Jaccard index: {:.4}", report.jaccard_index)?;
    output.flush()?;

    Ok(())
}
