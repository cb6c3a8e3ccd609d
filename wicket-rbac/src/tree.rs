//! Menu tree builder
//!
//! Shapes the flat menu set a resolution collects into the two-level
//! tree carried by the authorization context. Construction goes through
//! an arena of nodes indexed by menu id with explicit parent/child index
//! links; the arena is frozen into an immutable `Vec<MenuNode>` at the
//! end, so the finished tree is owned wholly by the context that carries
//! it and cannot alias or cycle.
//!
//! Hierarchy defects (a leaf without a resolvable parent, a parent in a
//! different tenant scope, a group claiming a parent) exclude the
//! offending node and flag it for operator visibility; they never fail
//! the resolution.

use std::collections::HashMap;

use tracing::warn;

use wicket_api_types::{Menu, MenuFeature, MenuId, MenuLevel, MenuNode};

/// Builder for the two-level menu hierarchy
#[derive(Debug, Clone)]
pub struct MenuTreeBuilder {
    prune_empty_groups: bool,
    audit: bool,
}

/// Arena slot: one resolved menu plus the indices of its children
struct ArenaEntry {
    menu: Menu,
    features: Vec<MenuFeature>,
    children: Vec<usize>,
}

impl MenuTreeBuilder {
    /// Builder with the default policy: empty groups are kept
    pub fn new() -> Self {
        Self {
            prune_empty_groups: false,
            audit: true,
        }
    }

    /// Drop level-1 menus with no resolved children and no features
    pub fn with_pruning(mut self, prune_empty_groups: bool) -> Self {
        self.prune_empty_groups = prune_empty_groups;
        self
    }

    /// Toggle audit logging of excluded nodes
    pub fn with_audit(mut self, audit: bool) -> Self {
        self.audit = audit;
        self
    }

    /// Build the ordered tree from the resolved flat menu set.
    ///
    /// `features_by_menu` carries the features already attached to each
    /// node; a menu absent from the map gets an empty feature list.
    /// Roots are ordered ascending by sort order with id as the tie
    /// break; children are ordered the same way within their parent.
    pub fn build(
        &self,
        menus: Vec<Menu>,
        features_by_menu: &HashMap<MenuId, Vec<MenuFeature>>,
    ) -> Vec<MenuNode> {
        // Arena pass: every resolved menu gets a slot, indexed by id.
        let mut arena: Vec<ArenaEntry> = Vec::with_capacity(menus.len());
        let mut index: HashMap<MenuId, usize> = HashMap::with_capacity(menus.len());
        for menu in menus {
            let features = features_by_menu.get(&menu.id).cloned().unwrap_or_default();
            index.insert(menu.id, arena.len());
            arena.push(ArenaEntry {
                menu,
                features,
                children: Vec::new(),
            });
        }

        // Link pass: attach each leaf to its group, excluding defects.
        let mut roots: Vec<usize> = Vec::new();
        for i in 0..arena.len() {
            let entry = &arena[i].menu;
            match entry.level {
                MenuLevel::Group => {
                    if entry.parent_id.is_some() {
                        self.flag_excluded(entry, "level-1 menu claims a parent");
                        continue;
                    }
                    roots.push(i);
                }
                MenuLevel::Leaf => {
                    let Some(parent_id) = entry.parent_id else {
                        self.flag_excluded(entry, "level-2 menu has no parent");
                        continue;
                    };
                    let Some(&parent_idx) = index.get(&parent_id) else {
                        self.flag_excluded(entry, "parent not in resolved set");
                        continue;
                    };
                    let parent = &arena[parent_idx].menu;
                    if parent.level != MenuLevel::Group {
                        self.flag_excluded(entry, "parent is not a level-1 menu");
                        continue;
                    }
                    if parent.tenant_id != entry.tenant_id {
                        self.flag_excluded(entry, "parent is in a different tenant scope");
                        continue;
                    }
                    arena[parent_idx].children.push(i);
                }
            }
        }

        // Order pass: (sort_order, id) ascending, everywhere.
        let sort_key = |arena: &[ArenaEntry], i: usize| {
            (arena[i].menu.sort_order, arena[i].menu.id)
        };
        roots.sort_by_key(|&i| sort_key(&arena, i));
        for i in 0..arena.len() {
            let mut children = std::mem::take(&mut arena[i].children);
            children.sort_by_key(|&c| sort_key(&arena, c));
            arena[i].children = children;
        }

        // Freeze pass: the arena becomes an immutable tree.
        let mut nodes = Vec::with_capacity(roots.len());
        for root in roots {
            let children: Vec<MenuNode> = arena[root]
                .children
                .clone()
                .into_iter()
                .map(|c| Self::freeze(&arena[c], None))
                .collect();
            if self.prune_empty_groups && children.is_empty() && arena[root].features.is_empty() {
                continue;
            }
            nodes.push(Self::freeze(&arena[root], Some(children)));
        }
        nodes
    }

    fn freeze(entry: &ArenaEntry, children: Option<Vec<MenuNode>>) -> MenuNode {
        MenuNode {
            id: entry.menu.id,
            name: entry.menu.name.clone(),
            path: entry.menu.path.clone(),
            icon: entry.menu.icon.clone(),
            sort_order: entry.menu.sort_order,
            level: entry.menu.level,
            features: entry.features.clone(),
            children,
        }
    }

    fn flag_excluded(&self, menu: &Menu, reason: &str) {
        if self.audit {
            warn!(menu_id = %menu.id, menu = %menu.name, reason, "menu excluded from tree");
        }
    }
}

impl Default for MenuTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
