//! Link relativization cases using datatest-stable.
//!
//! Each test case is a file in `tests/relativize-cases/` with three lines:
//! ```
//! <base path>
//! <target path>
//! <expected>
//! ```

use std::path::Path;

fn run_relativize_test(path: &Path) -> datatest_stable::Result<()> {
    facet_testhelpers::setup();

    let content = std::fs::read_to_string(path)?;
    let lines: Vec<&str> = content.lines().collect();

    if lines.len() != 3 {
        return Err(format!(
            "Test file must have exactly three lines, found {}",
            lines.len()
        )
        .into());
    }

    let (base, target, expected) = (lines[0], lines[1], lines[2]);
    let result = tapestry::relativize(base, target);

    if result != expected {
        return Err(format!(
            "Relativize failed!\nBase: {base}\nTarget: {target}\nResult: {result}\nExpected: {expected}"
        )
        .into());
    }

    Ok(())
}

datatest_stable::harness! {
    { test = run_relativize_test, root = "tests/relativize-cases", pattern = r".*\.txt$" },
}
