pub mod pattern;
pub mod report;

pub use pattern::{NumberPattern, PatternError};
pub use report::{BatchReport, RenameFailure};

use crate::scene::{DEFAULT_ROOTS, NodeId, NodeKind, PATH_SEPARATOR, SceneGraph, Selector};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Where an affix lands relative to the existing short name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AffixPosition {
    Prefix,
    Suffix,
}

/// Which end of the short name [`remove_character`] strips.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrimEnd {
    First,
    Last,
}

/// Node set a [`search_and_replace`] pass targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplaceScope {
    /// The current selection only.
    Selected,
    /// The current selection plus every node below it.
    Hierarchy,
    /// Every transform node in the scene.
    All,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenameError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error("search string cannot be empty")]
    EmptySearch,
}

/// Number the current selection with `pattern`, selection order first to
/// last. No renames are attempted when the pattern fails validation.
pub fn sequential_rename(
    scene: &mut dyn SceneGraph,
    pattern: &str,
) -> Result<BatchReport, RenameError> {
    let pattern = NumberPattern::parse(pattern)?;
    let selection = scene.list(Selector::Selection);

    let mut report = BatchReport::new();
    for (index, &node) in selection.iter().enumerate() {
        let name = pattern.format(index + 1);
        apply_rename(scene, node, &name, &mut report);
    }
    Ok(report)
}

/// Prepend or append `affix` to every selected node's short name.
pub fn add_affix(scene: &mut dyn SceneGraph, affix: &str, position: AffixPosition) -> BatchReport {
    let mut report = BatchReport::new();
    if affix.is_empty() {
        log::debug!("[rename] empty affix, nothing to do");
        return report;
    }

    for node in scene.list(Selector::Selection) {
        let Some(short) = resolve_short_name(scene, node, &mut report) else {
            continue;
        };
        let name = match position {
            AffixPosition::Prefix => format!("{affix}{short}"),
            AffixPosition::Suffix => format!("{short}{affix}"),
        };
        apply_rename(scene, node, &name, &mut report);
    }
    report
}

/// Replace every occurrence of `search` in the short names of the nodes
/// `scope` resolves to. Nodes without a match are skipped.
pub fn search_and_replace(
    scene: &mut dyn SceneGraph,
    scope: ReplaceScope,
    search: &str,
    replace: &str,
) -> Result<BatchReport, RenameError> {
    if search.is_empty() {
        return Err(RenameError::EmptySearch);
    }

    let mut report = BatchReport::new();
    for node in resolve_scope(scene, scope) {
        let Some(short) = resolve_short_name(scene, node, &mut report) else {
            continue;
        };
        if !short.contains(search) {
            report.record_skipped();
            continue;
        }
        let name = short.replace(search, replace);
        apply_rename(scene, node, &name, &mut report);
    }
    Ok(report)
}

/// Strip the first or last character of every selected node's short name.
/// Single-character names are left alone.
pub fn remove_character(scene: &mut dyn SceneGraph, end: TrimEnd) -> BatchReport {
    let mut report = BatchReport::new();
    for node in scene.list(Selector::Selection) {
        let Some(short) = resolve_short_name(scene, node, &mut report) else {
            continue;
        };
        if short.chars().count() <= 1 {
            report.record_skipped();
            continue;
        }
        let name = match end {
            TrimEnd::First => {
                let mut chars = short.chars();
                chars.next();
                chars.as_str().to_string()
            }
            TrimEnd::Last => {
                let mut chars = short.chars();
                chars.next_back();
                chars.as_str().to_string()
            }
        };
        apply_rename(scene, node, &name, &mut report);
    }
    report
}

/// Rename every transform's child shapes to `<transform short name>Shape`.
/// The default camera roots are left alone, as are shapes already conforming.
pub fn rename_shapes_to_parent(scene: &mut dyn SceneGraph) -> BatchReport {
    let mut report = BatchReport::new();
    for transform in scene.list(Selector::Kind(NodeKind::Transform)) {
        let Ok(path) = scene.full_path(transform) else {
            continue;
        };
        if is_default_root(&path) {
            continue;
        }

        let short = path
            .rsplit(PATH_SEPARATOR)
            .next()
            .unwrap_or_default()
            .to_string();
        let target = format!("{short}Shape");
        for shape in scene.shapes(transform) {
            let Some(current) = resolve_short_name(scene, shape, &mut report) else {
                continue;
            };
            if current == target {
                report.record_skipped();
                continue;
            }
            apply_rename(scene, shape, &target, &mut report);
        }
    }
    log::info!(
        "[rename] renamed {} shape node{}",
        report.renamed(),
        if report.renamed() == 1 { "" } else { "s" }
    );
    report
}

/// Select every transform whose short name is shared with another transform.
/// Returns the number of nodes selected; the current selection is untouched
/// when there are none.
pub fn select_duplicate_short_names(scene: &mut dyn SceneGraph) -> usize {
    let transforms = scene.list(Selector::Kind(NodeKind::Transform));

    let mut occurrences: HashMap<String, usize> = HashMap::new();
    let mut named = Vec::with_capacity(transforms.len());
    for node in transforms {
        let Ok(short) = scene.short_name(node) else {
            continue;
        };
        *occurrences.entry(short.clone()).or_default() += 1;
        named.push((node, short));
    }

    let duplicates: Vec<NodeId> = named
        .into_iter()
        .filter(|(_, short)| occurrences[short] > 1)
        .map(|(node, _)| node)
        .collect();

    if duplicates.is_empty() {
        log::info!("[rename] no duplicate short names");
        return 0;
    }
    scene.select(&duplicates);
    duplicates.len()
}

fn resolve_scope(scene: &dyn SceneGraph, scope: ReplaceScope) -> Vec<NodeId> {
    match scope {
        ReplaceScope::Selected => scene.list(Selector::Selection),
        ReplaceScope::Hierarchy => {
            let mut seen = HashSet::new();
            let mut nodes = Vec::new();
            for root in scene.list(Selector::Selection) {
                if seen.insert(root) {
                    nodes.push(root);
                }
                for descendant in scene.all_descendants(root) {
                    if seen.insert(descendant) {
                        nodes.push(descendant);
                    }
                }
            }
            nodes
        }
        ReplaceScope::All => scene.list(Selector::Kind(NodeKind::Transform)),
    }
}

fn resolve_short_name(
    scene: &dyn SceneGraph,
    node: NodeId,
    report: &mut BatchReport,
) -> Option<String> {
    match scene.short_name(node) {
        Ok(short) => Some(short),
        Err(err) => {
            log::error!("[rename] cannot resolve node {node:?}: {err}");
            report.record_failure(node, "", err);
            None
        }
    }
}

fn apply_rename(scene: &mut dyn SceneGraph, node: NodeId, name: &str, report: &mut BatchReport) {
    match scene.rename(node, name) {
        Ok(()) => report.record_renamed(),
        Err(err) => {
            log::warn!("[rename] skipping node {node:?}: {err}");
            report.record_failure(node, name, err);
        }
    }
}

fn is_default_root(path: &str) -> bool {
    path.strip_prefix(PATH_SEPARATOR)
        .map(|short| DEFAULT_ROOTS.contains(&short))
        .unwrap_or(false)
}
