//! Report Module
//!
//! End-of-run summary for batch operations.

use crate::batch::BatchResult;
use std::time::Duration;

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        format!("{}h {:02}m {:02}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{:.1}s", duration.as_secs_f64())
    }
}

pub fn print_summary_report(result: &BatchResult, duration: Duration, operation_name: &str) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║  📊 {:<56} ║", format!("{} Summary Report", operation_name));
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║  📁 Files Seen:          {:>10}                          ║", result.total);
    println!("║  ✅ Already Compatible:  {:>10}                          ║", result.compatible);
    println!("║  🔄 Converted:           {:>10}                          ║", result.converted);
    println!("║  ⏭️  Skipped:             {:>10}                          ║", result.skipped);
    println!("║  ❌ Failed:              {:>10}                          ║", result.failed);
    println!(
        "║  📈 Success Rate:        {:>9.1}%                          ║",
        result.success_rate()
    );
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!(
        "║  ⏱️  Total Time:          {:>10}                          ║",
        format_duration(duration)
    );
    println!("╚══════════════════════════════════════════════════════════════╝");

    if !result.errors.is_empty() {
        println!();
        println!("❌ Errors encountered:");
        for (path, error) in &result.errors {
            println!("   • {}: {}", path.display(), error);
        }
    }
}
