//! Subcommand handlers
//!
//! Handlers write to a caller-supplied sink so output can be captured.

use crate::error::CliError;
use sort_compiler::compression::encode;
use sort_compiler::{
    parse_many, parse_sort_expression_with_options, uncompress, BatchConfig, ItemType,
    ParseOptions, ParsedExpression, ResistNameSet, SortFilters,
};
use std::fs;
use std::io::Write;
use std::path::Path;

pub struct CompressArgs<'a> {
    pub expression: &'a str,
    pub item_type: ItemType,
    pub ascending: bool,
    pub element: Option<&'a str>,
    pub max_level: Option<u32>,
    pub min_level: Option<u32>,
    pub mode: &'a str,
}

fn write_expression(out: &mut impl Write, parsed: &ParsedExpression) -> Result<(), CliError> {
    writeln!(out, "pretty:   {}", parsed.pretty).map_err(io_error)?;
    writeln!(out, "compact:  {}", parsed.compact).map_err(io_error)?;
    writeln!(
        out,
        "computed: {}",
        serde_json::to_string_pretty(&parsed.computed_document())?
    )
    .map_err(io_error)?;
    Ok(())
}

fn io_error(source: std::io::Error) -> CliError {
    CliError::Io {
        path: "<stdout>".into(),
        source,
    }
}

pub fn parse(
    out: &mut impl Write,
    expression: &str,
    resists: &ResistNameSet,
    options: ParseOptions,
    json: bool,
) -> Result<(), CliError> {
    let parsed = parse_sort_expression_with_options(expression, resists, options)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&parsed)?).map_err(io_error)?;
    } else {
        write_expression(out, &parsed)?;
    }
    Ok(())
}

pub fn compress_filters(
    out: &mut impl Write,
    args: CompressArgs<'_>,
    resists: &ResistNameSet,
) -> Result<(), CliError> {
    let parsed = parse_sort_expression_with_options(args.expression, resists, ParseOptions::default())?;

    let mut filters = SortFilters::new(args.mode, args.item_type, parsed).ascending(args.ascending);
    if let Some(element) = args.element {
        filters = filters.with_weapon_element(element);
    }
    let min_level = args.min_level.unwrap_or(filters.min_level);
    let max_level = args.max_level.unwrap_or(filters.max_level);
    filters = filters.with_levels(min_level, max_level);

    // encode reports why a record cannot be produced
    let record = encode(&filters)?;
    log::debug!("Compressed to {} characters", record.chars().count());
    writeln!(out, "{}", record).map_err(io_error)?;
    Ok(())
}

pub fn decode(out: &mut impl Write, record: &str, json: bool) -> Result<(), CliError> {
    let filters = uncompress(record)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&filters)?).map_err(io_error)?;
        return Ok(());
    }

    writeln!(out, "mode:      {}", filters.mode).map_err(io_error)?;
    writeln!(out, "item type: {}", filters.item_type).map_err(io_error)?;
    writeln!(out, "ascending: {}", filters.ascending).map_err(io_error)?;
    if let Some(element) = &filters.weapon_element {
        writeln!(out, "element:   {}", element).map_err(io_error)?;
    }
    writeln!(out, "levels:    {}-{}", filters.min_level, filters.max_level).map_err(io_error)?;
    write_expression(out, &filters.expression)
}

/// Parse one expression per line; blank lines and `#` comments are skipped
pub fn batch(
    out: &mut impl Write,
    path: &Path,
    resists: &ResistNameSet,
    config: &BatchConfig,
) -> Result<(), CliError> {
    let content = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    log::info!(
        "Parsing {} expressions from {} on {} threads",
        lines.len(),
        path.display(),
        config.max_threads
    );

    let results = parse_many(&lines, resists, config)?;

    for entry in &results.entries {
        match &entry.result {
            Ok(parsed) => writeln!(out, "ok    {} => {}", entry.input, parsed.pretty),
            Err(error) => writeln!(
                out,
                "error {} => {}",
                entry.input,
                error.message().lines().next().unwrap_or_default()
            ),
        }
        .map_err(io_error)?;
    }
    writeln!(out, "{}", results.summary()).map_err(io_error)?;

    let rejected = results.failure_count();
    if rejected > 0 {
        return Err(CliError::BatchRejected {
            rejected,
            total: results.entries.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resists() -> ResistNameSet {
        ResistNameSet::with_standard_resists()
    }

    fn output(run: impl FnOnce(&mut Vec<u8>) -> Result<(), CliError>) -> String {
        let mut buffer = Vec::new();
        run(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn compress_args(expression: &str) -> CompressArgs<'_> {
        CompressArgs {
            expression,
            item_type: ItemType::Cape,
            ascending: true,
            element: None,
            max_level: None,
            min_level: Some(30),
            mode: "s",
        }
    }

    #[test]
    fn test_parse_prints_all_forms() {
        let text = output(|out| parse(out, "Ice", &resists(), ParseOptions::default(), false));
        assert!(text.contains("pretty:   Ice Res"));
        assert!(text.contains("compact:  ice"));
        assert!(text.contains("$resists.all"));
    }

    #[test]
    fn test_parse_json() {
        let text = output(|out| parse(out, "str * 2", &resists(), ParseOptions::default(), true));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["pretty"], "Str * 2");
    }

    #[test]
    fn test_parse_reports_invalid_expression() {
        let mut buffer = Vec::new();
        let error = parse(&mut buffer, "5", &resists(), ParseOptions::default(), false).unwrap_err();
        assert!(matches!(error, CliError::Expression(_)));
    }

    #[test]
    fn test_compress_then_decode() {
        let record = output(|out| compress_filters(out, compress_args("Int - (Dex + Str)"), &resists()));
        assert_eq!(record.trim(), "s`c`a`int-(dex+str)```30");

        let decoded = output(|out| decode(out, record.trim(), false));
        assert!(decoded.contains("item type: cape"));
        assert!(decoded.contains("levels:    30-90"));
        assert!(decoded.contains("pretty:   Int - (Dex + Str)"));
    }

    #[test]
    fn test_compress_rejects_overlong_record() {
        let mut args = compress_args("str");
        let element = "x".repeat(120);
        args.element = Some(&element);
        let mut buffer = Vec::new();
        assert!(matches!(
            compress_filters(&mut buffer, args, &resists()),
            Err(CliError::Codec(_))
        ));
    }

    #[test]
    fn test_compress_blank_element_is_dropped() {
        let mut args = compress_args("str");
        args.element = Some("");
        let record = output(|out| compress_filters(out, args, &resists()));
        assert_eq!(record.trim(), "s`c`a`str```30");
    }

    #[test]
    fn test_batch_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# sort keys").unwrap();
        writeln!(file, "str + dex").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "fire * 2").unwrap();

        let config = BatchConfig {
            max_threads: 2,
            ignore_length_limit: false,
        };
        let text = output(|out| batch(out, file.path(), &resists(), &config));
        assert!(text.contains("ok    str + dex => Str + Dex"));
        assert!(text.contains("ok    fire * 2 => Fire Res * 2"));
        assert!(text.contains("2 expressions"));
    }

    #[test]
    fn test_batch_reports_rejections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "str").unwrap();
        writeln!(file, "str /").unwrap();

        let config = BatchConfig {
            max_threads: 1,
            ignore_length_limit: false,
        };
        let mut buffer = Vec::new();
        let error = batch(&mut buffer, file.path(), &resists(), &config).unwrap_err();
        assert!(matches!(
            error,
            CliError::BatchRejected {
                rejected: 1,
                total: 2
            }
        ));
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("error str /"));
    }
}
