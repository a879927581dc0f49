use super::*;

#[test]
fn each_level_has_its_own_class() {
    assert_eq!(toast_class(NoticeLevel::Info), "toast toast--info");
    assert_eq!(toast_class(NoticeLevel::Warning), "toast toast--warning");
    assert_eq!(toast_class(NoticeLevel::Error), "toast toast--error");
}
