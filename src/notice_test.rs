use super::*;

#[test]
fn session_expired_is_an_error_notice() {
    let notice = Notice::session_expired();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, SESSION_EXPIRED_NOTICE);
}

#[test]
fn log_keeps_notices_in_order() {
    let log = NoticeLog::new();
    log.notify(Notice::info("first"));
    log.notify(Notice::warning("second"));

    let messages: Vec<_> = log.notices().into_iter().map(|n| n.message).collect();
    assert_eq!(messages, ["first", "second"]);
}

#[test]
fn drain_empties_the_log() {
    let log = NoticeLog::new();
    log.notify(Notice::error("boom"));

    assert_eq!(log.drain().len(), 1);
    assert!(log.notices().is_empty());
}

#[test]
fn notifier_works_through_references_and_rc() {
    let log = Rc::new(NoticeLog::new());
    let by_ref: &NoticeLog = &log;
    by_ref.notify(Notice::info("ref"));
    Rc::clone(&log).notify(Notice::info("rc"));

    assert_eq!(log.notices().len(), 2);
}

#[test]
fn tracing_notifier_accepts_every_level() {
    let notifier = TracingNotifier;
    notifier.notify(Notice::info("i"));
    notifier.notify(Notice::warning("w"));
    notifier.notify(Notice::error("e"));
}
