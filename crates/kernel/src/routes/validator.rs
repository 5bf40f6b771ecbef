//! Structural validation of menu trees before registration.
//!
//! Errors abort registration. Warnings are logged and reported but never
//! change the outcome.

use std::collections::{HashMap, HashSet};

use tracing::{error, warn};

use crate::menu::MenuNode;

/// Outcome of a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Menu tree validator.
///
/// Layout misuse is logged once per `(name, path)` for the lifetime of the
/// validator, however many passes run.
#[derive(Debug, Default)]
pub struct RouteValidator {
    strict_names: bool,
    warned_routes: HashSet<String>,
}

impl RouteValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat duplicate route names as errors instead of warnings.
    pub fn with_strict_names(mut self, strict: bool) -> Self {
        self.strict_names = strict;
        self
    }

    /// Number of distinct layout-misuse entries logged so far.
    pub fn logged_layout_misuse(&self) -> usize {
        self.warned_routes.len()
    }

    /// Validate a tree of menus whose paths are already absolute.
    pub fn validate(&mut self, menus: &[MenuNode]) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let name_issues = check_duplicate_names(menus);
        if self.strict_names {
            errors.extend(name_issues);
        } else {
            warnings.extend(name_issues);
        }
        warnings.extend(check_duplicate_components(menus, ""));
        check_components(menus, 0, &mut errors);
        self.check_layout_usage(menus, 1, &mut errors);

        ValidationReport {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    fn check_layout_usage(&mut self, menus: &[MenuNode], level: usize, errors: &mut Vec<String>) {
        for menu in menus {
            if level > 1 && menu.is_layout() {
                let message = format!(
                    "route '{}' ({}) uses the Layout component at level {level}, only first-level menus may use Layout",
                    menu.label(),
                    menu.path
                );
                let key = format!("{}:{}", menu.name, menu.path);
                if self.warned_routes.insert(key) {
                    error!(
                        name = %menu.name,
                        path = %menu.path,
                        depth = level,
                        "Layout used below first level"
                    );
                }
                errors.push(message);
            }
            self.check_layout_usage(menu.child_nodes(), level + 1, errors);
        }
    }
}

fn check_duplicate_names(menus: &[MenuNode]) -> Vec<String> {
    fn walk<'a>(
        menus: &'a [MenuNode],
        seen: &mut HashMap<&'a str, &'a str>,
        issues: &mut Vec<String>,
    ) {
        for menu in menus {
            if !menu.name.is_empty() {
                if let Some(first) = seen.get(menu.name.as_str()) {
                    warn!(
                        name = %menu.name,
                        path = %menu.path,
                        first = %first,
                        "duplicate route name"
                    );
                    issues.push(format!(
                        "duplicate route name '{}': {} conflicts with {}",
                        menu.name, menu.path, first
                    ));
                } else {
                    seen.insert(&menu.name, &menu.path);
                }
            }
            walk(menu.child_nodes(), seen, issues);
        }
    }

    let mut seen = HashMap::new();
    let mut issues = Vec::new();
    walk(menus, &mut seen, &mut issues);
    issues
}

fn check_duplicate_components(menus: &[MenuNode], parent_path: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut issues = Vec::new();

    for menu in menus {
        if menu.has_component() && !menu.is_layout() && !seen.insert(&menu.component) {
            warn!(
                name = %menu.name,
                parent = %parent_path,
                component = %menu.component,
                "duplicate component under the same parent"
            );
            issues.push(format!(
                "duplicate component '{}' under '{}' (route '{}')",
                menu.component,
                if parent_path.is_empty() { "/" } else { parent_path },
                menu.label()
            ));
        }
        issues.extend(check_duplicate_components(menu.child_nodes(), &menu.path));
    }

    issues
}

fn check_components(menus: &[MenuNode], depth: usize, errors: &mut Vec<String>) {
    for menu in menus {
        if !menu.has_component() && !menu.is_external() {
            if depth == 0 {
                errors.push(format!(
                    "first-level menu '{}' ({}) missing component, must point to Layout",
                    menu.label(),
                    menu.path
                ));
            } else if !menu.is_directory() {
                errors.push(format!(
                    "route '{}' ({}) missing component",
                    menu.label(),
                    menu.path
                ));
            }
        }
        check_components(menu.child_nodes(), depth + 1, errors);
    }
}
