// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::io::ExportedObject;
use crate::operator::{Operator, OperatorResult, Outcome, ReportLevel};
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report the outcome of an operator run
    pub fn report_operator(op: &dyn Operator, result: &OperatorResult, duration: Duration) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Operator:".bold(), op.label().cyan());
        println!("{}", "━".repeat(80).bright_black());

        match result.outcome {
            Outcome::Finished => println!("{} {}", "✅".green(), result.outcome.to_string().green().bold()),
            Outcome::Cancelled => println!("{} {}", "❌".red(), result.outcome.to_string().red().bold()),
        }

        for report in &result.reports {
            match report.level {
                ReportLevel::Info => println!("  {}", report.message),
                ReportLevel::Warning => println!("  {} {}", "warning:".yellow().bold(), report.message.yellow()),
                ReportLevel::Error => println!("  {} {}", "error:".red().bold(), report.message.red()),
            }
        }

        println!(
            "\n  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).cyan()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Summarize an exchange document
    pub fn report_exchange(file: &str, objects: &[ExportedObject]) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Exchange file:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());

        if objects.is_empty() {
            println!("  {}", "(no objects)".bright_black());
        }
        for ob in objects {
            let material = match (ob.has_material(), ob.color()) {
                (false, _) => "no material".bright_black().to_string(),
                (true, None) => "empty material".yellow().to_string(),
                (true, Some(c)) => format!("rgb({}, {}, {})", c.r, c.g, c.b),
            };
            println!(
                "  {:<32} {}x{} matrix  {}",
                ob.name.bold(),
                ob.matrix.nrows(),
                ob.matrix.ncols(),
                material
            );
        }
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Print a fatal configuration problem
    pub fn report_fatal(message: &str) {
        eprintln!("{} {}", "fatal:".red().bold(), message);
    }

    fn format_duration(duration: Duration) -> String {
        let ms = duration.as_secs_f64() * 1000.0;
        if ms < 1.0 {
            format!("{:.0}µs", duration.as_secs_f64() * 1_000_000.0)
        } else if ms < 1000.0 {
            format!("{:.2}ms", ms)
        } else {
            format!("{:.2}s", duration.as_secs_f64())
        }
    }
}
