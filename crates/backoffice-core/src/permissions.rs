//! Module/action permission model.
//!
//! A role grants a [`PermissionSet`] per [`Module`]. Roles store their grants
//! as an ordered list of [`ModulePermission`] entries (authoring order); the
//! server and the client both query the flattened [`PermissionMap`].
//!
//! Anything absent from a map is denied.
//!
//! # Example
//!
//! ```ignore
//! use backoffice_core::permissions::{Action, Module, PermissionMap};
//!
//! if permissions.allows(Module::Users, Action::Create) {
//!     // show the "new user" form
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::openapi::schema::{ObjectBuilder, Schema, Type};
use utoipa::openapi::RefOr;
use utoipa::{PartialSchema, ToSchema};

/// An administrable section of the back office.
///
/// The set is closed: names outside it are rejected when parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Module {
    Enterprises,
    Users,
    Roles,
    Dashboards,
    Employees,
    Products,
    ProductSale,
}

impl Module {
    pub const ALL: [Module; 7] = [
        Module::Enterprises,
        Module::Users,
        Module::Roles,
        Module::Dashboards,
        Module::Employees,
        Module::Products,
        Module::ProductSale,
    ];

    /// Wire name of the module.
    pub const fn as_str(self) -> &'static str {
        match self {
            Module::Enterprises => "Enterprises",
            Module::Users => "Users",
            Module::Roles => "Roles",
            Module::Dashboards => "Dashboards",
            Module::Employees => "Employees",
            Module::Products => "Products",
            Module::ProductSale => "Product Sale",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModule(pub String);

impl fmt::Display for UnknownModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown module: {}", self.0)
    }
}

impl std::error::Error for UnknownModule {}

impl FromStr for Module {
    type Err = UnknownModule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Module::ALL
            .into_iter()
            .find(|module| module.as_str() == s)
            .ok_or_else(|| UnknownModule(s.to_string()))
    }
}

impl Serialize for Module {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Module {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

impl PartialSchema for Module {
    fn schema() -> RefOr<Schema> {
        ObjectBuilder::new()
            .schema_type(Type::String)
            .enum_values(Some(Module::ALL.iter().map(|m| m.as_str())))
            .into()
    }
}

impl ToSchema for Module {}

/// An operation a permission set can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Read, Action::Create, Action::Update, Action::Delete];

    pub const fn as_str(self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| format!("Unknown action: {}", s))
    }
}

/// Four independent action flags for one module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PermissionSet {
    pub read: bool,
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

impl PermissionSet {
    pub const fn none() -> Self {
        Self {
            read: false,
            create: false,
            update: false,
            delete: false,
        }
    }

    pub const fn read_only() -> Self {
        Self {
            read: true,
            create: false,
            update: false,
            delete: false,
        }
    }

    pub const fn full() -> Self {
        Self {
            read: true,
            create: true,
            update: true,
            delete: true,
        }
    }

    pub const fn allows(&self, action: Action) -> bool {
        match action {
            Action::Read => self.read,
            Action::Create => self.create,
            Action::Update => self.update,
            Action::Delete => self.delete,
        }
    }

    /// Clears create/update/delete when read is not granted.
    pub const fn normalized(self) -> Self {
        if self.read { self } else { Self::none() }
    }

    pub const fn is_normalized(&self) -> bool {
        self.read || !(self.create || self.update || self.delete)
    }
}

/// One entry of a role: the permission set granted on a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ModulePermission {
    pub module: Module,
    pub permissions: PermissionSet,
}

impl ModulePermission {
    pub const fn new(module: Module, permissions: PermissionSet) -> Self {
        Self {
            module,
            permissions,
        }
    }
}

/// Decodes role entries read back from storage.
///
/// Stored rows may predate the current module set or have been written by
/// hand, so entries that do not decode (an unknown module, a malformed
/// permission set) are skipped instead of failing the whole role.
pub fn entries_from_stored(values: Vec<serde_json::Value>) -> Vec<ModulePermission> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<ModulePermission>(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable role permission entry");
                None
            }
        })
        .collect()
}

/// Returns the first module that appears more than once in `entries`.
pub fn find_duplicate_module(entries: &[ModulePermission]) -> Option<Module> {
    entries.iter().enumerate().find_map(|(idx, entry)| {
        entries[..idx]
            .iter()
            .any(|earlier| earlier.module == entry.module)
            .then_some(entry.module)
    })
}

/// Flattened `module -> permission set` view of a role.
///
/// Serialises as a JSON object keyed by module name, which is the shape
/// embedded in credentials and cached by clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct PermissionMap(BTreeMap<Module, PermissionSet>);

impl PermissionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flattens role entries. When a module is listed more than once the
    /// first entry wins.
    pub fn from_entries(entries: &[ModulePermission]) -> Self {
        let mut map = BTreeMap::new();
        for entry in entries {
            map.entry(entry.module).or_insert(entry.permissions);
        }
        Self(map)
    }

    pub fn get(&self, module: Module) -> Option<&PermissionSet> {
        self.0.get(&module)
    }

    pub fn allows(&self, module: Module, action: Action) -> bool {
        self.get(module).is_some_and(|set| set.allows(action))
    }

    pub fn insert(&mut self, module: Module, permissions: PermissionSet) {
        self.0.insert(module, permissions);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Module, &PermissionSet)> {
        self.0.iter().map(|(module, set)| (*module, set))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(Module, PermissionSet)> for PermissionMap {
    fn from_iter<I: IntoIterator<Item = (Module, PermissionSet)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(read: bool, create: bool, update: bool, delete: bool) -> PermissionSet {
        PermissionSet {
            read,
            create,
            update,
            delete,
        }
    }

    #[test]
    fn test_module_round_trips_through_str() {
        for module in Module::ALL {
            assert_eq!(module.as_str().parse::<Module>().unwrap(), module);
        }
        assert_eq!("Product Sale".parse::<Module>().unwrap(), Module::ProductSale);
        assert!("ProductSale".parse::<Module>().is_err());
        assert!("users".parse::<Module>().is_err());
    }

    #[test]
    fn test_module_serde_uses_display_name() {
        let json = serde_json::to_string(&Module::ProductSale).unwrap();
        assert_eq!(json, r#""Product Sale""#);

        let err = serde_json::from_str::<Module>(r#""Payroll""#).unwrap_err();
        assert!(err.to_string().contains("Unknown module: Payroll"));
    }

    #[test]
    fn test_action_parse() {
        assert_eq!("read".parse::<Action>().unwrap(), Action::Read);
        assert_eq!("delete".parse::<Action>().unwrap(), Action::Delete);
        assert!("Read".parse::<Action>().is_err());
    }

    #[test]
    fn test_permission_set_allows_each_flag_independently() {
        let permissions = set(true, false, true, false);
        assert!(permissions.allows(Action::Read));
        assert!(!permissions.allows(Action::Create));
        assert!(permissions.allows(Action::Update));
        assert!(!permissions.allows(Action::Delete));
    }

    #[test]
    fn test_permission_set_missing_flags_default_false() {
        let permissions: PermissionSet = serde_json::from_str(r#"{"read":true}"#).unwrap();
        assert_eq!(permissions, PermissionSet::read_only());
    }

    #[test]
    fn test_normalized_clears_writes_without_read() {
        let orphaned = set(false, true, true, true);
        assert!(!orphaned.is_normalized());
        assert_eq!(orphaned.normalized(), PermissionSet::none());

        let granted = set(true, true, false, true);
        assert!(granted.is_normalized());
        assert_eq!(granted.normalized(), granted);
    }

    #[test]
    fn test_from_entries_first_entry_wins() {
        let entries = vec![
            ModulePermission::new(Module::Products, PermissionSet::read_only()),
            ModulePermission::new(Module::Products, PermissionSet::full()),
        ];
        let map = PermissionMap::from_entries(&entries);

        assert_eq!(map.len(), 1);
        assert!(map.allows(Module::Products, Action::Read));
        assert!(!map.allows(Module::Products, Action::Delete));
    }

    #[test]
    fn test_absent_module_is_denied() {
        let map = PermissionMap::from_entries(&[ModulePermission::new(
            Module::Employees,
            PermissionSet::full(),
        )]);

        for action in Action::ALL {
            assert!(!map.allows(Module::Roles, action));
            assert!(map.allows(Module::Employees, action));
        }
    }

    #[test]
    fn test_find_duplicate_module() {
        let unique = vec![
            ModulePermission::new(Module::Users, PermissionSet::full()),
            ModulePermission::new(Module::Roles, PermissionSet::full()),
        ];
        assert_eq!(find_duplicate_module(&unique), None);

        let duplicated = vec![
            ModulePermission::new(Module::Users, PermissionSet::full()),
            ModulePermission::new(Module::Roles, PermissionSet::full()),
            ModulePermission::new(Module::Users, PermissionSet::none()),
        ];
        assert_eq!(find_duplicate_module(&duplicated), Some(Module::Users));
    }

    #[test]
    fn test_stored_entries_skip_unknown_modules() {
        let stored: Vec<serde_json::Value> = serde_json::from_str(
            r#"[
                {"module":"Products","permissions":{"read":true,"create":true,"update":false,"delete":false}},
                {"module":"Payroll","permissions":{"read":true,"create":true,"update":true,"delete":true}},
                {"module":"Users"},
                {"module":"Roles","permissions":{"read":true}}
            ]"#,
        )
        .unwrap();

        let entries = entries_from_stored(stored);
        assert_eq!(
            entries,
            vec![
                ModulePermission::new(Module::Products, set(true, true, false, false)),
                ModulePermission::new(Module::Roles, PermissionSet::read_only()),
            ]
        );
    }

    #[test]
    fn test_permission_map_json_shape() {
        let map = PermissionMap::from_entries(&[
            ModulePermission::new(Module::ProductSale, PermissionSet::read_only()),
            ModulePermission::new(Module::Users, PermissionSet::full()),
        ]);

        let value = serde_json::to_value(&map).unwrap();
        assert_eq!(value["Product Sale"]["read"], true);
        assert_eq!(value["Product Sale"]["create"], false);
        assert_eq!(value["Users"]["delete"], true);

        let decoded: PermissionMap = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, map);
    }
}
