use crate::utils::error::CutListError;

/// Log a failed run, print the user-facing message and exit with the code
/// matching the error's severity.
pub fn exit_with(e: CutListError) -> ! {
    tracing::error!(
        "❌ Cut-list run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
