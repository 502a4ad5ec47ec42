//! Output formatting for substring search results

use crate::index::types::{Record, RecordId};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print matching records as `id:text`, with every occurrence of the
/// pattern highlighted.
pub fn print_matches(
    records: &[Record],
    ids: &[RecordId],
    pattern: &str,
    color: bool,
) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);

    for &id in ids {
        let Some(record) = records.iter().find(|r| r.id == id) else {
            continue;
        };

        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(stdout, "{}", record.id)?;
        stdout.reset()?;
        write!(stdout, ":")?;

        let mut rest = record.text.as_str();
        if !pattern.is_empty() {
            while let Some(pos) = rest.find(pattern) {
                write!(stdout, "{}", &rest[..pos])?;
                stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
                write!(stdout, "{}", &rest[pos..pos + pattern.len()])?;
                stdout.reset()?;
                rest = &rest[pos + pattern.len()..];
            }
        }
        writeln!(stdout, "{}", rest)?;
    }

    Ok(())
}
