use super::*;

#[test]
fn full_path_without_search() {
    assert_eq!(full_path("/device", ""), "/device");
    assert_eq!(full_path("/device", "?"), "/device");
}

#[test]
fn full_path_with_search() {
    assert_eq!(full_path("/login", "?redirect=%2Fdevice"), "/login?redirect=%2Fdevice");
    assert_eq!(full_path("/report", "month=5"), "/report?month=5");
}

#[cfg(not(feature = "csr"))]
#[test]
fn no_location_outside_browser() {
    let nav = LocationNavigator;
    assert!(nav.current_path().is_none());
    nav.navigate(&Redirect::new("/login"));
}
