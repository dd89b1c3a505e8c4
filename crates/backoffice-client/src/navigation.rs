//! Admin navigation.
//!
//! The admin area has a fixed, ordered list of sections. A section is shown
//! when the session can read its module, and the admin root forwards to the
//! first section shown.

use backoffice_core::{Module, PermissionMap};

use crate::access::can_read;
use crate::session::SessionContext;

pub const LOGIN_ROUTE: &str = "/";
pub const ADMIN_ROUTE: &str = "/admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub module: Module,
    pub label: &'static str,
    /// Path segment under [`ADMIN_ROUTE`].
    pub path: &'static str,
}

impl Section {
    const fn new(module: Module, label: &'static str, path: &'static str) -> Self {
        Self {
            module,
            label,
            path,
        }
    }

    pub fn route(&self) -> String {
        format!("{}/{}", ADMIN_ROUTE, self.path)
    }
}

pub const SECTIONS: [Section; 5] = [
    Section::new(Module::Users, "Users", "users"),
    Section::new(Module::Roles, "Roles", "roles"),
    Section::new(Module::Enterprises, "Enterprises", "enterprises"),
    Section::new(Module::Employees, "Employees", "employees"),
    Section::new(Module::Products, "Products", "products"),
];

/// Sections the permissions can read, in menu order.
pub fn visible_sections(permissions: &PermissionMap) -> Vec<&'static Section> {
    SECTIONS
        .iter()
        .filter(|section| can_read(permissions, section.module))
        .collect()
}

pub fn landing_section(permissions: &PermissionMap) -> Option<&'static Section> {
    SECTIONS
        .iter()
        .find(|section| can_read(permissions, section.module))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Redirect(String),
}

fn is_admin_path(path: &str) -> bool {
    path == ADMIN_ROUTE || path.starts_with("/admin/")
}

/// Decides where a visit to `path` ends up.
///
/// The server still gates every request, so a section route the session
/// cannot read is not redirected here.
pub fn resolve(path: &str, session: Option<&SessionContext>) -> Navigation {
    match session {
        None if is_admin_path(path) => Navigation::Redirect(LOGIN_ROUTE.to_string()),
        None => Navigation::Stay,
        Some(_) if path == LOGIN_ROUTE => Navigation::Redirect(ADMIN_ROUTE.to_string()),
        Some(session) if path == ADMIN_ROUTE || path == "/admin/" => {
            match landing_section(&session.permissions) {
                Some(section) => Navigation::Redirect(section.route()),
                None => Navigation::Stay,
            }
        }
        Some(_) => Navigation::Stay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::PermissionSet;

    fn permissions(entries: &[(Module, PermissionSet)]) -> PermissionMap {
        entries.iter().copied().collect()
    }

    fn session(permissions: PermissionMap) -> SessionContext {
        SessionContext {
            token: "t".to_string(),
            user: None,
            permissions,
        }
    }

    #[test]
    fn test_visible_sections_keep_menu_order() {
        let map = permissions(&[
            (Module::Products, PermissionSet::read_only()),
            (Module::Users, PermissionSet::full()),
            (Module::Roles, PermissionSet::none()),
            (Module::Dashboards, PermissionSet::full()),
        ]);

        let labels: Vec<_> = visible_sections(&map).iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Users", "Products"]);
    }

    #[test]
    fn test_visible_sections_match_read_access() {
        let map = permissions(&[
            (Module::Enterprises, PermissionSet::read_only()),
            (Module::Employees, PermissionSet::full()),
        ]);
        let visible = visible_sections(&map);

        for section in &SECTIONS {
            assert_eq!(
                visible.contains(&section),
                can_read(&map, section.module),
                "{}",
                section.label
            );
        }
    }

    #[test]
    fn test_landing_section() {
        let map = permissions(&[(Module::Employees, PermissionSet::read_only())]);
        assert_eq!(landing_section(&map).map(|s| s.route()).as_deref(), Some("/admin/employees"));
        assert_eq!(landing_section(&PermissionMap::new()), None);
    }

    #[test]
    fn test_admin_root_forwards_to_first_section() {
        let session = session(permissions(&[(Module::Employees, PermissionSet::read_only())]));

        for path in ["/admin", "/admin/"] {
            assert_eq!(
                resolve(path, Some(&session)),
                Navigation::Redirect("/admin/employees".to_string())
            );
        }
    }

    #[test]
    fn test_admin_root_without_sections_stays() {
        let session = session(PermissionMap::new());
        assert_eq!(resolve("/admin", Some(&session)), Navigation::Stay);
    }

    #[test]
    fn test_admin_paths_require_session() {
        for path in ["/admin", "/admin/", "/admin/products"] {
            assert_eq!(resolve(path, None), Navigation::Redirect("/".to_string()));
        }
        assert_eq!(resolve("/", None), Navigation::Stay);
        assert_eq!(resolve("/administrator", None), Navigation::Stay);
    }

    #[test]
    fn test_login_route_with_session_goes_to_admin() {
        let session = session(PermissionMap::new());
        assert_eq!(
            resolve("/", Some(&session)),
            Navigation::Redirect("/admin".to_string())
        );
        assert_eq!(resolve("/admin/roles", Some(&session)), Navigation::Stay);
    }
}
