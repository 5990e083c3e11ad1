//! Runtime location primitives
//!
//! A [`Location`] names one participant of the runtime (a service, a market
//! data source, a strategy) by mode, category, group and name. The
//! [`RuntimeLocator`] maps locations to directories below the runtime root:
//!
//! ```text
//! <runtime_dir>/<category>/<group>/<name>/<layout>/<mode>
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::DomainError;

/// Run mode of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Live,
    Data,
    Replay,
    Backtest,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Live => "live",
            Mode::Data => "data",
            Mode::Replay => "replay",
            Mode::Backtest => "backtest",
        }
    }
}

/// Functional category of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Md,
    Td,
    Strategy,
    System,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Md => "md",
            Category::Td => "td",
            Category::Strategy => "strategy",
            Category::System => "system",
        }
    }
}

/// Kind of artifact stored for a location; doubles as directory name and file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    Journal,
    Sqlite,
    Nanomsg,
    Log,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Journal => "journal",
            Layout::Sqlite => "db",
            Layout::Nanomsg => "nn",
            Layout::Log => "log",
        }
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display_as_str!(Mode, Category, Layout);

/// Shared handle resolving locations to directories below a runtime root.
///
/// Clones share the same root.
#[derive(Debug, Clone)]
pub struct RuntimeLocator {
    root: Arc<PathBuf>,
}

impl RuntimeLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding `layout` artifacts of `location`.
    pub fn layout_dir(&self, location: &Location, layout: Layout) -> PathBuf {
        self.root
            .join(location.category.as_str())
            .join(&location.group)
            .join(&location.name)
            .join(layout.as_str())
            .join(location.mode.as_str())
    }

    /// File `<name>.<ext>` inside [`RuntimeLocator::layout_dir`].
    pub fn layout_file(&self, location: &Location, layout: Layout, name: &str) -> PathBuf {
        self.layout_dir(location, layout)
            .join(format!("{}.{}", name, layout.as_str()))
    }

    /// True when both handles point at the same shared root.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }
}

impl PartialEq for RuntimeLocator {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl Eq for RuntimeLocator {}

/// Address of one runtime participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub mode: Mode,
    pub category: Category,
    pub group: String,
    pub name: String,
    pub locator: RuntimeLocator,
}

impl Location {
    /// Create a location; `group` and `name` must be non-empty and contain no path separators.
    pub fn new(
        mode: Mode,
        category: Category,
        group: impl Into<String>,
        name: impl Into<String>,
        locator: RuntimeLocator,
    ) -> Result<Self, DomainError> {
        let group = group.into();
        let name = name.into();
        validate_part("group", &group)?;
        validate_part("name", &name)?;
        Ok(Self {
            mode,
            category,
            group,
            name,
            locator,
        })
    }

    /// Unique name: `category/group/name/mode`.
    pub fn uname(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.category, self.group, self.name, self.mode
        )
    }

    pub fn layout_dir(&self, layout: Layout) -> PathBuf {
        self.locator.layout_dir(self, layout)
    }

    pub fn layout_file(&self, layout: Layout, name: &str) -> PathBuf {
        self.locator.layout_file(self, layout, name)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uname())
    }
}

fn validate_part(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() || value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(DomainError::InvalidLocation {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn locator() -> RuntimeLocator {
        RuntimeLocator::new("/tmp/kfc/runtime")
    }

    #[test]
    fn given_location_when_uname_then_joins_category_group_name_mode() {
        let loc = Location::new(Mode::Live, Category::System, "service", "console", locator())
            .unwrap();
        assert_eq!(loc.uname(), "system/service/console/live");
        assert_eq!(loc.to_string(), "system/service/console/live");
    }

    #[test]
    fn given_location_when_layout_dir_then_resolves_below_runtime_root() {
        let loc = Location::new(Mode::Live, Category::Md, "sim", "sim", locator()).unwrap();
        assert_eq!(
            loc.layout_dir(Layout::Log),
            PathBuf::from("/tmp/kfc/runtime/md/sim/sim/log/live")
        );
        assert_eq!(
            loc.layout_file(Layout::Journal, "00000001"),
            PathBuf::from("/tmp/kfc/runtime/md/sim/sim/journal/live/00000001.journal")
        );
    }

    #[rstest]
    #[case("")]
    #[case("  ")]
    #[case("a/b")]
    #[case("..")]
    fn given_invalid_group_when_new_then_rejected(#[case] group: &str) {
        let result = Location::new(Mode::Live, Category::System, group, "x", locator());
        assert!(matches!(
            result,
            Err(DomainError::InvalidLocation { field: "group", .. })
        ));
    }

    #[test]
    fn given_cloned_locator_when_compared_then_shares_root() {
        let a = locator();
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(a, RuntimeLocator::new("/tmp/kfc/runtime"));
        assert!(!a.ptr_eq(&RuntimeLocator::new("/tmp/kfc/runtime")));
    }
}
