//! Client-side access checks over the cached permission snapshot.
//!
//! The cache is whatever the login response handed out, so it can be stale
//! or hand-edited. Parsing it never fails: anything that is not a known
//! module with boolean flags is dropped, and dropped entries deny.

use backoffice_core::{Action, Module, PermissionMap, PermissionSet};
use serde_json::Value;

/// True iff the cached flag for `module`/`action` is exactly `true`.
pub fn has_access(permissions: &PermissionMap, module: Module, action: Action) -> bool {
    permissions.allows(module, action)
}

/// Shorthand for the common read check.
pub fn can_read(permissions: &PermissionMap, module: Module) -> bool {
    has_access(permissions, module, Action::Read)
}

/// Parses a cached permission snapshot.
///
/// Absent input, invalid JSON and non-object payloads yield an empty map.
/// Unknown module names and non-object entries are skipped, and flags that
/// are not JSON booleans count as `false`.
pub fn parse_permissions(raw: Option<&str>) -> PermissionMap {
    let Some(raw) = raw else {
        return PermissionMap::new();
    };

    let Ok(Value::Object(entries)) = serde_json::from_str::<Value>(raw) else {
        tracing::debug!("Ignoring unreadable permission cache");
        return PermissionMap::new();
    };

    entries
        .iter()
        .filter_map(|(name, flags)| {
            let module = name.parse::<Module>().ok()?;
            let flags = flags.as_object()?;
            let flag = |key: &str| flags.get(key).and_then(Value::as_bool).unwrap_or(false);
            Some((
                module,
                PermissionSet {
                    read: flag("read"),
                    create: flag("create"),
                    update: flag("update"),
                    delete: flag("delete"),
                },
            ))
        })
        .collect()
}
