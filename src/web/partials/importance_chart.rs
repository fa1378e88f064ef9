use maud::{html, Markup, Render};

use crate::importance::FeatureImportance;

/// Horizontal bar chart, the longest bar on top.
pub struct ImportanceChart<'a> {
    pub title: String,
    pub feature_label: String,
    pub importance_label: String,
    pub importances: &'a [FeatureImportance],
}

impl Render for ImportanceChart<'_> {
    fn render(&self) -> Markup {
        let max_importance = self
            .importances
            .iter()
            .map(|item| item.importance)
            .max_by(|lhs, rhs| lhs.total_cmp(rhs))
            .unwrap_or_default();

        html! {
            div.box id="importance-chart" {
                p.title."is-5" { (self.title) }
                div.table-container {
                    table.table.is-fullwidth {
                        thead {
                            tr {
                                th { (self.feature_label) }
                                th { (self.importance_label) }
                                th {}
                            }
                        }
                        tbody {
                            @for item in self.importances {
                                tr {
                                    th style="width: 15rem" { code { (item.feature) } }
                                    td.is-family-monospace style="width: 1px" { (format!("{:.4}", item.importance)) }
                                    td style="vertical-align: middle" {
                                        progress.progress.is-info
                                            title=(item.importance)
                                            max=(max_importance)
                                            value=(item.importance) {
                                                (item.importance)
                                            }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
