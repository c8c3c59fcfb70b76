//! Compress command implementation.

use super::RunOptions;
use crate::utils::{Output, create_progress_bar, open_input, print_json_report};
use oxipress_lzw::{LzwConfig, compress_stream};
use std::path::Path;

pub fn cmd_compress(
    input: Option<&Path>,
    output: Option<&Path>,
    config: LzwConfig,
    options: &RunOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = open_input(input)?;
    let output = Output::create(output)?;
    let output_name = output.name();

    let pb = create_progress_bar(
        input.len.unwrap_or(0),
        options.progress && input.len.is_some(),
    );
    pb.set_message("Compressing");
    let reader = pb.wrap_read(input.reader);

    let result = output.complete(|sink| compress_stream(reader, sink, config));
    pb.finish_and_clear();
    let stats = result?;

    if options.verbose {
        eprintln!(
            "{}: {} -> {} bytes ({:.1}% saved, {} codes, final width {} bits)",
            input.name,
            stats.bytes_in,
            stats.bytes_out,
            stats.space_savings(),
            stats.codes_emitted,
            stats.final_bits
        );
        if stats.dictionary_full {
            eprintln!("  Dictionary filled at {} codes", stats.codes_assigned);
        }
    }

    if options.json {
        print_json_report(
            "compress",
            &input.name,
            &output_name,
            stats.ratio(),
            stats.space_savings(),
            &stats,
        )?;
    }

    Ok(())
}
