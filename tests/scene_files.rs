use camino::Utf8PathBuf;
use datatest_stable::Utf8Path;

/// Print a colored inline diff using dissimilar
fn format_inline_diff(expected: &str, actual: &str) -> String {
    use dissimilar::Chunk;

    let chunks = dissimilar::diff(expected, actual);
    let mut output = String::new();

    output.push_str("\n=== Inline Diff (expected vs printed) ===\n");
    output.push_str("Legend: [-expected only-] [+printed only+] [unchanged]\n\n");

    for chunk in chunks {
        match chunk {
            Chunk::Equal(s) => {
                let lines: Vec<&str> = s.lines().collect();
                if lines.len() > 6 {
                    output.push_str(lines[0]);
                    output.push('\n');
                    output.push_str(&format!("... ({} unchanged lines) ...\n", lines.len() - 2));
                    output.push_str(lines[lines.len() - 1]);
                    if s.ends_with('\n') {
                        output.push('\n');
                    }
                } else {
                    output.push_str(s);
                }
            }
            Chunk::Delete(s) => {
                output.push_str("\x1b[31m[-");
                output.push_str(s);
                output.push_str("-]\x1b[0m");
            }
            Chunk::Insert(s) => {
                output.push_str("\x1b[32m[+");
                output.push_str(s);
                output.push_str("+]\x1b[0m");
            }
        }
    }

    output
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn in_dir(path: &Utf8Path, dir: &str) -> bool {
    path.components().any(|c| c.as_str() == dir)
}

/// Where the expected result for `path` is recorded: the file itself for
/// canonical fixtures, a `.expected` sibling for everything else
fn expected_path(path: &Utf8Path) -> Utf8PathBuf {
    if in_dir(path, "canonical") {
        path.to_path_buf()
    } else {
        path.with_extension("expected")
    }
}

/// Invalid fixtures record the diagnostic code the parse must fail with
fn check_invalid(path: &Utf8Path, source: &str) -> datatest_stable::Result<()> {
    use miette::Diagnostic;

    let expected_file = expected_path(path);
    let expected = std::fs::read_to_string(&expected_file)?;
    let expected = expected.trim();

    match unitdraw::parse_named(path.as_str(), source) {
        Ok(document) => Err(format!("{} parsed but should fail: {:?}", path, document).into()),
        Err(e) => {
            let code = e.code().map(|c| c.to_string()).unwrap_or_default();
            if code == expected {
                Ok(())
            } else {
                Err(format!(
                    "{} failed with {} instead of {}:\n{:?}",
                    path,
                    code,
                    expected,
                    miette::Report::new(e)
                )
                .into())
            }
        }
    }
}

fn test_scene_file(path: &Utf8Path) -> datatest_stable::Result<()> {
    init_tracing();
    let source = std::fs::read_to_string(path)?;

    if in_dir(path, "invalid") {
        return check_invalid(path, &source);
    }

    let document = unitdraw::parse_named(path.as_str(), &source)
        .map_err(|e| format!("{:?}", miette::Report::new(e)))?;
    let printed = unitdraw::print(&document)?;

    let expected_file = expected_path(path);
    let expected = std::fs::read_to_string(&expected_file)?;
    // Fixture files end with a newline; printed documents do not
    let expected = expected.trim_end_matches('\n');

    if printed != expected {
        return Err(format!(
            "printed form of {} differs from {}:\n{}",
            path,
            expected_file,
            format_inline_diff(expected, &printed)
        )
        .into());
    }

    let reparsed = unitdraw::parse(&printed)?;
    if reparsed != document {
        return Err(format!("{} does not reparse to the same document", path).into());
    }

    Ok(())
}

datatest_stable::harness! {
    { test = test_scene_file, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/scenes"), pattern = r"\.scene$" },
}
