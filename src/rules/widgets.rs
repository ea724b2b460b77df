//! Composite ARIA widget pattern rule.
//!
//! Validates nine container patterns, each scan self-contained: tablist,
//! menu/menubar, combobox, grid/table, tree, dialog/alertdialog, toolbar,
//! listbox, and radiogroup. Results are concatenated in that fixed pattern
//! order; within a pattern the index is 1-based in document order.

use crate::context::DocumentContext;
use crate::dom::style::is_visible;
use crate::verdict::Verdict;
use scraper::{ElementRef, Selector};

/// Pattern-specific component counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetDetail {
    /// `role="tablist"`
    Tablist {
        /// `[role=tab]` descendants
        tabs: usize,
        /// tabpanels connected through `aria-controls`
        tabpanels: usize,
    },
    /// `role="menu"` or `role="menubar"`
    Menu {
        /// `[role=menuitem]` descendants
        menuitems: usize,
        /// `[role=menuitemcheckbox]` descendants
        menuitemcheckboxes: usize,
        /// `[role=menuitemradio]` descendants
        menuitemradios: usize,
    },
    /// `role="combobox"`
    Combobox {
        /// A listbox was resolved (nested or via `aria-controls`)
        has_listbox: bool,
        /// `[role=option]` count inside the resolved listbox
        options: usize,
    },
    /// `role="grid"` or `role="table"`
    Grid {
        /// `[role=row]` descendants
        rows: usize,
        /// `[role=rowheader]` descendants
        rowheaders: usize,
        /// `[role=columnheader]` descendants
        columnheaders: usize,
        /// `[role=cell]` descendants
        cells: usize,
    },
    /// `role="tree"`
    Tree {
        /// `[role=treeitem]` descendants
        treeitems: usize,
        /// `[role=group]` descendants
        groups: usize,
    },
    /// `role="dialog"` or `role="alertdialog"`
    Dialog {
        /// A title source was present
        has_title: bool,
    },
    /// `role="toolbar"`
    Toolbar {
        /// Buttons (native or `[role=button]`)
        buttons: usize,
        /// Links
        links: usize,
        /// Inputs
        inputs: usize,
    },
    /// `role="listbox"`
    Listbox {
        /// `[role=option]` descendants
        options: usize,
        /// `[role=group]` descendants
        groups: usize,
    },
    /// `role="radiogroup"`
    Radiogroup {
        /// `[role=radio]` descendants
        radios: usize,
    },
}

/// Result record for one widget container.
#[derive(Debug)]
pub struct WidgetCheck<'a> {
    /// The container element
    pub element: ElementRef<'a>,
    /// The container's role name
    pub interface: String,
    /// 1-based index within the pattern group
    pub index: usize,
    /// Component counts
    pub detail: WidgetDetail,
    /// Verdict
    pub valid: Verdict,
    /// Findings
    pub issues: Vec<String>,
    /// Whether the container was hidden at evaluation time
    pub hidden: bool,
}

fn sel(s: &str) -> Selector {
    Selector::parse(s).expect("valid selector")
}

fn count(el: ElementRef<'_>, selector: &Selector) -> usize {
    el.select(selector).count()
}

fn check_tablists<'a>(ctx: &'a DocumentContext, out: &mut Vec<WidgetCheck<'a>>) {
    let tablist_sel = sel("[role=\"tablist\"]");
    let tab_sel = sel("[role=\"tab\"]");

    for (index, tablist) in ctx.document().select(&tablist_sel).enumerate() {
        let tabs: Vec<_> = tablist.select(&tab_sel).collect();

        // Panels count only when a tab's aria-controls id resolves to an
        // element whose role is tabpanel.
        let mut connected_panels = 0usize;
        for tab in &tabs {
            if let Some(controls) = tab.value().attr("aria-controls") {
                for panel_id in controls.split_whitespace() {
                    if let Some(panel) = ctx.element_by_id(panel_id) {
                        if panel.value().attr("role") == Some("tabpanel") {
                            connected_panels += 1;
                        }
                    }
                }
            }
        }

        let mut valid = Verdict::Pass;
        let mut issues = Vec::new();
        if tabs.is_empty() {
            valid = Verdict::Fail;
            issues.push("tablist has no tab roles inside".to_string());
        } else if connected_panels == 0 {
            valid = Verdict::Fail;
            issues.push("tabs exist but no connected tabpanel".to_string());
        } else if tabs.len() != connected_panels {
            valid = Verdict::Warning;
            issues.push(format!(
                "tab count ({}) does not match connected tabpanel count ({})",
                tabs.len(),
                connected_panels
            ));
        }

        out.push(WidgetCheck {
            element: tablist,
            interface: "tablist".to_string(),
            index: index + 1,
            detail: WidgetDetail::Tablist {
                tabs: tabs.len(),
                tabpanels: connected_panels,
            },
            valid,
            issues,
            hidden: !is_visible(tablist),
        });
    }
}

fn check_menus<'a>(ctx: &'a DocumentContext, out: &mut Vec<WidgetCheck<'a>>) {
    let menubar_sel = sel("[role=\"menubar\"]");
    let menu_sel = sel("[role=\"menu\"]");
    let item_sel = sel("[role=\"menuitem\"]");
    let checkbox_sel = sel("[role=\"menuitemcheckbox\"]");
    let radio_sel = sel("[role=\"menuitemradio\"]");

    let menus: Vec<_> = ctx
        .document()
        .select(&menubar_sel)
        .chain(ctx.document().select(&menu_sel))
        .collect();

    for (index, menu) in menus.into_iter().enumerate() {
        let menuitems = count(menu, &item_sel);
        let menuitemcheckboxes = count(menu, &checkbox_sel);
        let menuitemradios = count(menu, &radio_sel);

        let mut valid = Verdict::Pass;
        let mut issues = Vec::new();
        if menuitems == 0 && menuitemcheckboxes == 0 && menuitemradios == 0 {
            valid = Verdict::Fail;
            issues.push("menu/menubar has no menuitem".to_string());
        }

        out.push(WidgetCheck {
            element: menu,
            interface: menu.value().attr("role").unwrap_or("").to_string(),
            index: index + 1,
            detail: WidgetDetail::Menu {
                menuitems,
                menuitemcheckboxes,
                menuitemradios,
            },
            valid,
            issues,
            hidden: !is_visible(menu),
        });
    }
}

fn check_comboboxes<'a>(ctx: &'a DocumentContext, out: &mut Vec<WidgetCheck<'a>>) {
    let combobox_sel = sel("[role=\"combobox\"]");
    let listbox_sel = sel("[role=\"listbox\"]");
    let option_sel = sel("[role=\"option\"]");

    for (index, combobox) in ctx.document().select(&combobox_sel).enumerate() {
        // Nested listbox wins; the aria-controls reference is only honored
        // when the target's role is exactly listbox.
        let listbox = combobox.select(&listbox_sel).next().or_else(|| {
            combobox
                .value()
                .attr("aria-controls")
                .and_then(|id| ctx.element_by_id(id.trim()))
                .filter(|el| el.value().attr("role") == Some("listbox"))
        });

        let options = listbox.map(|lb| count(lb, &option_sel)).unwrap_or(0);

        let mut valid = Verdict::Pass;
        let mut issues = Vec::new();
        if listbox.is_none() {
            valid = Verdict::Fail;
            issues.push("combobox has no associated listbox".to_string());
        }
        if listbox.is_some() && options == 0 {
            valid = Verdict::Fail;
            issues.push("listbox present but no option".to_string());
        }

        out.push(WidgetCheck {
            element: combobox,
            interface: "combobox".to_string(),
            index: index + 1,
            detail: WidgetDetail::Combobox {
                has_listbox: listbox.is_some(),
                options,
            },
            valid,
            issues,
            hidden: !is_visible(combobox),
        });
    }
}

fn check_grids<'a>(ctx: &'a DocumentContext, out: &mut Vec<WidgetCheck<'a>>) {
    let grid_sel = sel("[role=\"grid\"]");
    let table_sel = sel("[role=\"table\"]");
    let row_sel = sel("[role=\"row\"]");
    let rowheader_sel = sel("[role=\"rowheader\"]");
    let columnheader_sel = sel("[role=\"columnheader\"]");
    let cell_sel = sel("[role=\"cell\"]");

    let grids: Vec<_> = ctx
        .document()
        .select(&grid_sel)
        .chain(ctx.document().select(&table_sel))
        .collect();

    for (index, grid) in grids.into_iter().enumerate() {
        let rows = count(grid, &row_sel);
        let rowheaders = count(grid, &rowheader_sel);
        let columnheaders = count(grid, &columnheader_sel);
        let cells = count(grid, &cell_sel);

        let mut valid = Verdict::Pass;
        let mut issues = Vec::new();
        if rows == 0 {
            valid = Verdict::Fail;
            issues.push("grid/table has no row roles".to_string());
        }
        if rows > 0 && cells == 0 && rowheaders == 0 && columnheaders == 0 {
            valid = Verdict::Fail;
            issues.push("rows have no cells or headers".to_string());
        }

        out.push(WidgetCheck {
            element: grid,
            interface: grid.value().attr("role").unwrap_or("").to_string(),
            index: index + 1,
            detail: WidgetDetail::Grid {
                rows,
                rowheaders,
                columnheaders,
                cells,
            },
            valid,
            issues,
            hidden: !is_visible(grid),
        });
    }
}

fn check_trees<'a>(ctx: &'a DocumentContext, out: &mut Vec<WidgetCheck<'a>>) {
    let tree_sel = sel("[role=\"tree\"]");
    let item_sel = sel("[role=\"treeitem\"]");
    let group_sel = sel("[role=\"group\"]");

    for (index, tree) in ctx.document().select(&tree_sel).enumerate() {
        let treeitems = count(tree, &item_sel);
        let groups = count(tree, &group_sel);

        let mut valid = Verdict::Pass;
        let mut issues = Vec::new();
        if treeitems == 0 {
            valid = Verdict::Fail;
            issues.push("tree has no treeitem".to_string());
        }

        out.push(WidgetCheck {
            element: tree,
            interface: "tree".to_string(),
            index: index + 1,
            detail: WidgetDetail::Tree { treeitems, groups },
            valid,
            issues,
            hidden: !is_visible(tree),
        });
    }
}

fn check_dialogs<'a>(ctx: &'a DocumentContext, out: &mut Vec<WidgetCheck<'a>>) {
    let dialog_sel = sel("[role=\"dialog\"], [role=\"alertdialog\"]");
    let heading_sel = sel("[role=\"heading\"]");

    for (index, dialog) in ctx.document().select(&dialog_sel).enumerate() {
        let value = dialog.value();
        let has_title = value.attr("aria-labelledby").map_or(false, |v| !v.is_empty())
            || value.attr("aria-label").map_or(false, |v| !v.is_empty())
            || dialog.select(&heading_sel).next().is_some();

        let mut valid = Verdict::Pass;
        let mut issues = Vec::new();
        if !has_title {
            valid = Verdict::Fail;
            issues.push(
                "dialog has no title (aria-labelledby, aria-label, or heading)".to_string(),
            );
        }

        out.push(WidgetCheck {
            element: dialog,
            interface: value.attr("role").unwrap_or("").to_string(),
            index: index + 1,
            detail: WidgetDetail::Dialog { has_title },
            valid,
            issues,
            hidden: !is_visible(dialog),
        });
    }
}

fn check_toolbars<'a>(ctx: &'a DocumentContext, out: &mut Vec<WidgetCheck<'a>>) {
    let toolbar_sel = sel("[role=\"toolbar\"]");
    let button_sel = sel("button, [role=\"button\"]");
    let link_sel = sel("a");
    let input_sel = sel("input");

    for (index, toolbar) in ctx.document().select(&toolbar_sel).enumerate() {
        let buttons = count(toolbar, &button_sel);
        let links = count(toolbar, &link_sel);
        let inputs = count(toolbar, &input_sel);

        let mut valid = Verdict::Pass;
        let mut issues = Vec::new();
        if buttons == 0 && links == 0 && inputs == 0 {
            valid = Verdict::Fail;
            issues.push("toolbar has no interactive elements (button, link, input)".to_string());
        }

        out.push(WidgetCheck {
            element: toolbar,
            interface: "toolbar".to_string(),
            index: index + 1,
            detail: WidgetDetail::Toolbar { buttons, links, inputs },
            valid,
            issues,
            hidden: !is_visible(toolbar),
        });
    }
}

fn check_listboxes<'a>(ctx: &'a DocumentContext, out: &mut Vec<WidgetCheck<'a>>) {
    let listbox_sel = sel("[role=\"listbox\"]");
    let option_sel = sel("[role=\"option\"]");
    let group_sel = sel("[role=\"group\"]");

    for (index, listbox) in ctx.document().select(&listbox_sel).enumerate() {
        let options = count(listbox, &option_sel);
        let groups = count(listbox, &group_sel);

        let mut valid = Verdict::Pass;
        let mut issues = Vec::new();
        if options == 0 {
            valid = Verdict::Fail;
            issues.push("listbox has no option".to_string());
        }

        out.push(WidgetCheck {
            element: listbox,
            interface: "listbox".to_string(),
            index: index + 1,
            detail: WidgetDetail::Listbox { options, groups },
            valid,
            issues,
            hidden: !is_visible(listbox),
        });
    }
}

fn check_radiogroups<'a>(ctx: &'a DocumentContext, out: &mut Vec<WidgetCheck<'a>>) {
    let group_sel = sel("[role=\"radiogroup\"]");
    let radio_sel = sel("[role=\"radio\"]");

    for (index, radiogroup) in ctx.document().select(&group_sel).enumerate() {
        let radios = count(radiogroup, &radio_sel);

        let mut valid = Verdict::Pass;
        let mut issues = Vec::new();
        if radios == 0 {
            valid = Verdict::Fail;
            issues.push("radiogroup has no radio".to_string());
        }

        out.push(WidgetCheck {
            element: radiogroup,
            interface: "radiogroup".to_string(),
            index: index + 1,
            detail: WidgetDetail::Radiogroup { radios },
            valid,
            issues,
            hidden: !is_visible(radiogroup),
        });
    }
}

/// Audit all nine ARIA widget patterns, concatenated in fixed pattern order.
pub fn check_web_application<'a>(ctx: &'a DocumentContext) -> Vec<WidgetCheck<'a>> {
    let mut out = Vec::new();
    check_tablists(ctx, &mut out);
    check_menus(ctx, &mut out);
    check_comboboxes(ctx, &mut out);
    check_grids(ctx, &mut out);
    check_trees(ctx, &mut out);
    check_dialogs(ctx, &mut out);
    check_toolbars(ctx, &mut out);
    check_listboxes(ctx, &mut out);
    check_radiogroups(ctx, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(html: &str) -> Vec<WidgetCheck<'static>> {
        let ctx: &'static DocumentContext = Box::leak(Box::new(DocumentContext::parse(html)));
        check_web_application(ctx)
    }

    fn only<'a>(
        results: &'a [WidgetCheck<'static>],
        interface: &str,
    ) -> Vec<&'a WidgetCheck<'static>> {
        results.iter().filter(|r| r.interface == interface).collect()
    }

    #[test]
    fn complete_tablist_passes() {
        let results = run(concat!(
            r#"<div role="tablist">"#,
            r#"<button role="tab" aria-controls="p1">One</button>"#,
            r#"<button role="tab" aria-controls="p2">Two</button>"#,
            "</div>",
            r#"<div role="tabpanel" id="p1">panel one</div>"#,
            r#"<div role="tabpanel" id="p2">panel two</div>"#,
        ));
        let tablists = only(&results, "tablist");
        assert_eq!(tablists.len(), 1);
        assert_eq!(tablists[0].valid, Verdict::Pass);
        assert_eq!(
            tablists[0].detail,
            WidgetDetail::Tablist { tabs: 2, tabpanels: 2 }
        );
    }

    #[test]
    fn tablist_with_dangling_controls_fails() {
        let results = run(
            r#"<div role="tablist"><div role="tab" aria-controls="p1">t</div></div>"#,
        );
        let tablists = only(&results, "tablist");
        assert_eq!(tablists[0].valid, Verdict::Fail);
        assert!(tablists[0].issues.iter().any(|i| i.contains("no connected tabpanel")));
    }

    #[test]
    fn tab_panel_count_mismatch_warns_never_fails() {
        let results = run(concat!(
            r#"<div role="tablist">"#,
            r#"<div role="tab" aria-controls="p1">a</div>"#,
            r#"<div role="tab">b</div>"#,
            "</div>",
            r#"<div role="tabpanel" id="p1">one</div>"#,
        ));
        let tablists = only(&results, "tablist");
        assert_eq!(tablists[0].valid, Verdict::Warning);
    }

    #[test]
    fn unreferenced_tabpanels_are_not_counted() {
        let results = run(concat!(
            r#"<div role="tablist"><div role="tab" aria-controls="p1">a</div></div>"#,
            r#"<div role="tabpanel" id="p1">linked</div>"#,
            r#"<div role="tabpanel" id="stray">stray</div>"#,
        ));
        let tablists = only(&results, "tablist");
        assert_eq!(
            tablists[0].detail,
            WidgetDetail::Tablist { tabs: 1, tabpanels: 1 }
        );
        assert_eq!(tablists[0].valid, Verdict::Pass);
    }

    #[test]
    fn empty_tablist_fails() {
        let results = run(r#"<div role="tablist"></div>"#);
        assert_eq!(only(&results, "tablist")[0].valid, Verdict::Fail);
    }

    #[test]
    fn menu_requires_any_menuitem_kind() {
        let results = run(concat!(
            r#"<ul role="menu"><li role="menuitem">Open</li></ul>"#,
            r#"<ul role="menubar"><li role="menuitemcheckbox">Bold</li></ul>"#,
            r#"<ul role="menu"></ul>"#,
        ));
        let menubar = only(&results, "menubar");
        assert_eq!(menubar[0].valid, Verdict::Pass);
        let menus = only(&results, "menu");
        assert_eq!(menus[0].valid, Verdict::Pass);
        assert_eq!(menus[1].valid, Verdict::Fail);
    }

    #[test]
    fn combobox_prefers_nested_listbox() {
        let results = run(concat!(
            r#"<div role="combobox"><input>"#,
            r#"<div role="listbox"><div role="option">a</div></div></div>"#,
        ));
        let combo = only(&results, "combobox");
        assert_eq!(combo[0].valid, Verdict::Pass);
        assert_eq!(
            combo[0].detail,
            WidgetDetail::Combobox { has_listbox: true, options: 1 }
        );
    }

    #[test]
    fn combobox_nested_listbox_without_options_fails() {
        let results = run(
            r#"<div role="combobox"><input><div role="listbox"></div></div>"#,
        );
        let combo = only(&results, "combobox");
        assert_eq!(combo[0].valid, Verdict::Fail);
        assert!(combo[0].issues.iter().any(|i| i == "listbox present but no option"));
    }

    #[test]
    fn combobox_controls_reference_requires_listbox_role() {
        let results = run(concat!(
            r#"<div role="combobox" aria-controls="lb"><input></div>"#,
            r#"<div id="lb" role="listbox"><div role="option">x</div></div>"#,
            r#"<div role="combobox" aria-controls="not-a-listbox"><input></div>"#,
            r#"<div id="not-a-listbox" role="grid"><div role="row"><div role="cell">c</div></div></div>"#,
        ));
        let combos = only(&results, "combobox");
        assert_eq!(combos[0].valid, Verdict::Pass);
        assert_eq!(combos[1].valid, Verdict::Fail);
        assert!(combos[1].issues.iter().any(|i| i.contains("no associated listbox")));
    }

    #[test]
    fn grid_requires_rows_and_cells() {
        let results = run(concat!(
            r#"<div role="grid"><div role="row"><div role="cell">1</div></div></div>"#,
            r#"<div role="grid"></div>"#,
            r#"<div role="table"><div role="row"></div></div>"#,
        ));
        let grids = only(&results, "grid");
        assert_eq!(grids[0].valid, Verdict::Pass);
        assert_eq!(grids[1].valid, Verdict::Fail);
        let tables = only(&results, "table");
        assert_eq!(tables[0].valid, Verdict::Fail);
        assert!(tables[0].issues.iter().any(|i| i.contains("no cells or headers")));
    }

    #[test]
    fn tree_toolbar_listbox_radiogroup_presence_checks() {
        let results = run(concat!(
            r#"<div role="tree"><div role="treeitem">node</div></div>"#,
            r#"<div role="tree"></div>"#,
            r#"<div role="toolbar"><button>B</button></div>"#,
            r#"<div role="toolbar"><span>decor</span></div>"#,
            r#"<div role="listbox"><div role="option">o</div></div>"#,
            r#"<div role="listbox"></div>"#,
            r#"<div role="radiogroup"><div role="radio">r</div></div>"#,
            r#"<div role="radiogroup"></div>"#,
        ));
        for interface in ["tree", "toolbar", "listbox", "radiogroup"] {
            let group = only(&results, interface);
            assert_eq!(group.len(), 2, "{}", interface);
            assert_eq!(group[0].valid, Verdict::Pass, "{}", interface);
            assert_eq!(group[1].valid, Verdict::Fail, "{}", interface);
        }
    }

    #[test]
    fn dialog_title_sources() {
        let results = run(concat!(
            r#"<div role="dialog" aria-label="Settings"></div>"#,
            r#"<div role="alertdialog"><div role="heading">Alert</div></div>"#,
            r#"<div role="dialog"><p>untitled</p></div>"#,
        ));
        let dialogs: Vec<_> = results
            .iter()
            .filter(|r| r.interface == "dialog" || r.interface == "alertdialog")
            .collect();
        assert_eq!(dialogs[0].valid, Verdict::Pass);
        assert_eq!(dialogs[1].valid, Verdict::Pass);
        assert_eq!(dialogs[2].valid, Verdict::Fail);
    }

    #[test]
    fn pattern_groups_are_concatenated_in_fixed_order() {
        let results = run(concat!(
            r#"<div role="radiogroup"><div role="radio">r</div></div>"#,
            r#"<div role="tablist"><div role="tab" aria-controls="p">t</div></div>"#,
            r#"<div role="tabpanel" id="p">p</div>"#,
        ));
        // tablist comes first despite appearing later in the document
        assert_eq!(results[0].interface, "tablist");
        assert_eq!(results.last().unwrap().interface, "radiogroup");
    }
}
