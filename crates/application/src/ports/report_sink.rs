//! Report sink port

use apiprobe_domain::report::Attachment;

/// Port receiving diagnostic attachments for the currently running test.
///
/// Attaching never fails from the caller's point of view: a sink that cannot
/// persist an attachment logs and drops it.
pub trait ReportSink: Send + Sync {
    /// Records an attachment against the running test.
    fn attach(&self, attachment: Attachment);
}
