//! Commands that work on a raw HTML document.

use anyhow::{Context, Result};
use boganto_core::{annotate_with, extract_headings_with, reading_stats, Config, HeadingLevel};
use std::io::Read;
use std::path::Path;

/// Read a file, or stdin when the path is "-"
fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {:?}", input))
    }
}

pub fn print_toc(config: &Config, input: &Path, json: bool) -> Result<()> {
    let html = read_input(input)?;
    let toc = extract_headings_with(&html, &config.headings);
    tracing::debug!("Found {} headings", toc.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&toc)?);
        return Ok(());
    }

    for entry in &toc {
        let indent = match entry.level {
            HeadingLevel::H2 => "",
            HeadingLevel::H3 => "  ",
        };
        println!("{}- {} (#{})", indent, entry.text, entry.id);
    }
    Ok(())
}

pub fn print_annotated(config: &Config, input: &Path) -> Result<()> {
    let html = read_input(input)?;
    print!("{}", annotate_with(&html, &config.headings));
    Ok(())
}

pub fn print_read_time(config: &Config, input: &Path, wpm: Option<u32>, json: bool) -> Result<()> {
    let html = read_input(input)?;
    let wpm = wpm.unwrap_or(config.reading.words_per_minute);
    let stats = reading_stats(&html, wpm);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{} min read", stats.minutes);
    }
    Ok(())
}
