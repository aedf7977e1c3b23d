//! Banner helper used by the demos to label each block of example code.

use std::io::{self, Write};

const RULE: &str =
  "###################################################################################";

/// Prints a `### name ####` header, runs `code` and closes the block with a
/// rule line. Output goes to stdout; use [`snippet_to`] to capture it.
pub fn snippet(name: &str, code: impl FnOnce()) {
  let stdout = io::stdout();
  // stdout is not locked across `code`, the snippet prints on its own
  if let Err(err) = snippet_to(&mut &stdout, name, code) {
    tracing::warn!(%err, "failed to write snippet banner");
  }
}

/// Same as [`snippet`], writing the banner lines to `out`.
pub fn snippet_to<W: Write>(out: &mut W, name: &str, code: impl FnOnce()) -> io::Result<()> {
  writeln!(out, "\n### {name} ####")?;
  out.flush()?;
  tracing::info_span!("snippet", name).in_scope(code);
  writeln!(out, "{RULE}")?;
  out.flush()
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn banner_around_code() {
    let mut out = Vec::new();
    let mut ran = false;
    snippet_to(&mut out, "Filter", || ran = true).unwrap();

    assert!(ran);
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines, vec!["", "### Filter ####", RULE]);
  }
}
