//! Decompress command implementation.

use super::RunOptions;
use crate::utils::{Output, create_progress_bar, open_input, print_json_report};
use oxipress_lzw::decompress_stream;
use std::path::Path;

pub fn cmd_decompress(
    input: Option<&Path>,
    output: Option<&Path>,
    options: &RunOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = open_input(input)?;
    let output = Output::create(output)?;
    let output_name = output.name();

    let pb = create_progress_bar(
        input.len.unwrap_or(0),
        options.progress && input.len.is_some(),
    );
    pb.set_message("Decompressing");
    let reader = pb.wrap_read(input.reader);

    let result = output.complete(|sink| decompress_stream(reader, sink));
    pb.finish_and_clear();
    let stats = result?;

    if options.verbose {
        eprintln!(
            "{}: {} -> {} bytes ({} codes, max width {} bits)",
            input.name, stats.bytes_in, stats.bytes_out, stats.codes_read, stats.max_bits
        );
    }

    if options.json {
        print_json_report(
            "decompress",
            &input.name,
            &output_name,
            stats.ratio(),
            stats.space_savings(),
            &stats,
        )?;
    }

    Ok(())
}
