use crate::script::script_model::{AssertionSpec, ReplayResult};

// ============================================================================
// Console reporter — formatted terminal output
// ============================================================================

/// Format a replay result for terminal output.
///
/// ```text
/// ✗ FAIL  Signup draft (6 steps, 3 assertions)
///     [FAIL] Step 4: Stored — expected stored "a@b.com", found None
///
/// === Results: 2 passed, 1 failed ===
/// ```
pub fn format_console_report(result: &ReplayResult) -> String {
    let mut out = String::new();

    let marker = if result.passed {
        "\u{2713} PASS"
    } else {
        "\u{2717} FAIL"
    };

    out.push_str(&format!(
        "{}  {} ({} steps, {} assertions)\n",
        marker,
        result.script_name,
        result.steps_run,
        result.assertion_results.len()
    ));

    if let Some(ref error) = result.error {
        out.push_str(&format!("    [ERROR] {}\n", error));
    }

    for ar in result.assertion_results.iter().filter(|ar| !ar.passed) {
        let detail = ar.message.as_deref().unwrap_or("assertion failed");
        out.push_str(&format!(
            "    [FAIL] Step {}: {} — {}\n",
            ar.step_index,
            assertion_name(&ar.spec),
            detail
        ));
    }

    let passed = result.assertion_results.iter().filter(|a| a.passed).count();
    let failed = result.assertion_results.len() - passed;
    out.push_str(&format!(
        "\n=== Results: {} passed, {} failed ===\n",
        passed, failed
    ));

    out
}

fn assertion_name(spec: &AssertionSpec) -> &'static str {
    match spec {
        AssertionSpec::Stored { .. } => "Stored",
        AssertionSpec::NotStored { .. } => "NotStored",
        AssertionSpec::Value { .. } => "Value",
        AssertionSpec::Checked { .. } => "Checked",
        AssertionSpec::Key { .. } => "Key",
        AssertionSpec::StoreSize { .. } => "StoreSize",
    }
}
