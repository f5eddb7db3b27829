//! Navbar link behavior.

pub const GENERATE_LINK_ID: &str = "generateScheduleLink";
pub const MENU_TOGGLE_ID: &str = "aitu-menu-toggle";
pub const MENU_LINKS_SELECTOR: &str = ".aitu-menu-items a";
pub const CONTENT_ANCHOR_ID: &str = "main-content";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    PreventDefault,
    ScrollToContent,
    CollapseMenu,
}

/// Whether the generate link should scroll in place instead of navigating.
///
/// True on the landing page, which is served as `/` or `.../index.html`.
pub fn should_intercept(pathname: &str) -> bool {
    pathname == "/" || pathname.ends_with("/index.html")
}

/// Actions for a click on the generate link.
pub fn generate_link_actions(pathname: &str) -> Vec<NavAction> {
    if should_intercept(pathname) {
        vec![
            NavAction::PreventDefault,
            NavAction::ScrollToContent,
            NavAction::CollapseMenu,
        ]
    } else {
        Vec::new()
    }
}

/// Actions for a click on any mobile menu link.
pub fn menu_link_actions() -> Vec<NavAction> {
    vec![NavAction::CollapseMenu]
}

/// Actions for a click on either download button, before the download runs.
pub fn download_button_actions() -> Vec<NavAction> {
    vec![NavAction::PreventDefault]
}

/// Whether `pagehide` should release the session.
///
/// A page entering the back/forward cache (`persisted`) keeps its session so
/// it is still live when the user navigates back.
pub fn releases_session_on_pagehide(persisted: bool) -> bool {
    !persisted
}
