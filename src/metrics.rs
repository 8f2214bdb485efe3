//! Metric names and descriptions.
//!
//! The crate only records through the `metrics` facade; the host decides
//! whether a recorder (Prometheus or otherwise) is installed.

/// Emails accepted by the SMTP server.
pub const EMAILS_SENT_TOTAL: &str = "roommail_emails_sent_total";

/// Emails that failed to build or submit.
pub const EMAILS_FAILED_TOTAL: &str = "roommail_emails_failed_total";

/// Dispatch calls that produced no email, labelled by `reason`.
pub const EMAILS_SKIPPED_TOTAL: &str = "roommail_emails_skipped_total";

/// Register all metric descriptions.
///
/// Call once after the host installs its recorder. Descriptions provide
/// HELP text in exporters that support it.
pub fn register_metric_descriptions() {
    use metrics::describe_counter;

    describe_counter!(
        EMAILS_SENT_TOTAL,
        "Total number of emails accepted by the SMTP server"
    );
    describe_counter!(
        EMAILS_FAILED_TOTAL,
        "Total number of emails that failed to build or submit"
    );
    describe_counter!(
        EMAILS_SKIPPED_TOTAL,
        "Total number of dispatch calls that produced no email (disabled, unknown event, invalid recipient)"
    );
}
