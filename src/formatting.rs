use std::fmt::Write as FmtWrite;
use std::io::IsTerminal;
use std::process::ExitCode;

use dte_lib::{DteError, DteOutput, ErrorOutput, GeneratedFile, TokenSummary, DTE_OUTPUT_VERSION};

use crate::cli::OutputFormat;

/// Write output to stdout in the requested format.
pub fn write_output(body: &DteOutput, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body)?,
        OutputFormat::Pretty => write_pretty_output(body),
    };
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: DteError, format: OutputFormat) -> ExitCode {
    tracing::debug!(error = %err, "command failed");
    let error_payload = err.to_payload();
    let payload = DteOutput::Error(ErrorOutput {
        version: DTE_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            println!("{content}");
        }
        OutputFormat::Pretty => write_pretty_output(&payload),
    };

    // Exit code 2 is fatal; 1 is reserved for partial batch failures.
    ExitCode::from(2)
}

/// Write compact JSON to stdout.
fn write_json_output(body: &DteOutput) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    println!("{content}");
    Ok(())
}

/// Human summary on a TTY; pretty JSON for pipes and redirects.
fn write_pretty_output(body: &DteOutput) {
    if std::io::stdout().is_terminal() {
        println!("{}", format_pretty(body, true));
        return;
    }
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    println!("{content}");
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &DteOutput, colorize: bool) -> String {
    match body {
        DteOutput::Extract(out) => {
            let mut buf = String::new();
            let header = color("[EXTRACT]", "36", colorize);
            writeln!(buf, "{} Design tokens for {}", header, out.url).ok();
            writeln!(buf, "Input: {}", out.input).ok();
            writeln!(buf, "Extracted at: {}", out.extracted_at).ok();
            write_summary(&mut buf, &out.summary);
            write_files(&mut buf, &out.files);
            buf
        }
        DteOutput::Batch(out) => {
            let mut buf = String::new();
            let all_ok = out.failed == 0;
            let status = color(
                if all_ok { "OK" } else { "PARTIAL" },
                if all_ok { "32" } else { "33" },
                colorize,
            );
            writeln!(
                buf,
                "{} Batch: {} succeeded, {} failed (out: {})",
                status,
                out.succeeded,
                out.failed,
                out.out_dir.display()
            )
            .ok();
            for item in &out.results {
                if item.ok {
                    let mark = color("ok", "32", colorize);
                    let url = item.url.as_deref().unwrap_or("-");
                    writeln!(buf, "- {:4} {} ({})", mark, item.input, url).ok();
                    for file in &item.files {
                        writeln!(buf, "    {}", file.path.display()).ok();
                    }
                } else {
                    let mark = color("fail", "31", colorize);
                    let reason = item
                        .error
                        .as_ref()
                        .map(|e| e.message.as_str())
                        .unwrap_or("unknown error");
                    writeln!(buf, "- {:4} {}: {}", mark, item.input, reason).ok();
                }
            }
            buf
        }
        DteOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

fn write_summary(buf: &mut String, summary: &TokenSummary) {
    let rows = [
        ("semantic roles", summary.semantic_roles),
        ("root variables", summary.root_variables),
        ("solid colors", summary.solid_colors),
        ("gradients", summary.gradients),
        ("shadows", summary.shadows),
        ("typography", summary.typography_styles),
        ("font sizes", summary.font_size_steps),
        ("spacing", summary.spacing_steps),
        ("radii", summary.radius_steps),
        ("transitions", summary.transitions),
        ("animations", summary.animations),
        ("keyframes", summary.keyframes),
    ];
    writeln!(buf, "Tokens:").ok();
    for (label, count) in rows {
        writeln!(buf, "- {:16} {}", label, count).ok();
    }
}

fn write_files(buf: &mut String, files: &[GeneratedFile]) {
    if files.is_empty() {
        return;
    }
    writeln!(buf, "Files:").ok();
    for file in files {
        let label = format!("{:?}", file.format).to_lowercase();
        writeln!(buf, "- {:10} {}", label, file.path.display()).ok();
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Determine exit code for the batch command.
pub fn exit_code_for_batch(failed: usize) -> ExitCode {
    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
