//! JSON shapes of admin pages, built from a model's admin configuration.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use blog_core::admin::{
    AdminAction, AdminField, ChangeForm, ChangeList, ChangeListQuery, DateFilter, DateHierarchy,
    FieldKind, FieldMeta, FilterValue, ListRow, ModelAdmin,
};

#[derive(Debug, Serialize)]
pub struct RowView {
    pub id: Uuid,
    /// String form of the object.
    pub display: String,
    /// One cell per column, in column order.
    pub cells: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct FilterChoice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct FilterSpec {
    pub field: &'static str,
    pub label: &'static str,
    /// Empty for filters whose values are ids of related rows.
    pub choices: Vec<FilterChoice>,
}

#[derive(Debug, Serialize)]
pub struct ChangeListView {
    pub model: &'static str,
    pub verbose_name_plural: &'static str,
    pub columns: Vec<FieldMeta>,
    pub rows: Vec<RowView>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub num_pages: u64,
    pub search_enabled: bool,
    pub search_terms: Vec<String>,
    pub filters: Vec<FilterSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_hierarchy: Option<DateHierarchy>,
    /// Query of the next level up while drilled down; empty leads back to
    /// all dates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_back: Option<BTreeMap<&'static str, String>>,
    pub actions: Vec<AdminAction>,
}

pub fn changelist_view<F, R>(
    admin: &ModelAdmin<F>,
    query: &ChangeListQuery<F>,
    list: ChangeList<R>,
    date_hierarchy: Option<DateHierarchy>,
) -> ChangeListView
where
    F: AdminField,
    R: ListRow<F> + Display,
{
    let rows = list
        .rows
        .iter()
        .map(|row| RowView {
            id: row.pk(),
            display: row.to_string(),
            cells: admin.list_display.iter().map(|f| row.cell(*f)).collect(),
        })
        .collect();

    ChangeListView {
        model: admin.model_name,
        verbose_name_plural: admin.verbose_name_plural,
        columns: admin.columns(),
        rows,
        total: list.total,
        page: list.page,
        per_page: list.per_page,
        num_pages: list.num_pages,
        search_enabled: !admin.search_fields.is_empty(),
        search_terms: query.search_terms.clone(),
        filters: admin
            .list_filter
            .iter()
            .map(|f| filter_spec(*f, query))
            .collect(),
        date_hierarchy,
        date_back: query.drilldown.as_ref().map(|d| {
            d.parent()
                .map(|up| up.to_params().into_iter().collect())
                .unwrap_or_default()
        }),
        actions: admin.action_list(),
    }
}

fn filter_spec<F: AdminField>(field: F, query: &ChangeListQuery<F>) -> FilterSpec {
    let active = query
        .filters
        .iter()
        .find(|f| f.field == field)
        .map(|f| &f.value);

    let choices = match field.kind() {
        FieldKind::Choice { choices } => choices
            .iter()
            .map(|(value, label)| FilterChoice {
                value: value.to_string(),
                label: label.to_string(),
                selected: matches!(active, Some(FilterValue::Choice(v)) if v == value),
            })
            .collect(),
        FieldKind::Boolean => [("1", "Yes", true), ("0", "No", false)]
            .into_iter()
            .map(|(value, label, flag)| FilterChoice {
                value: value.to_string(),
                label: label.to_string(),
                selected: matches!(active, Some(FilterValue::Bool(b)) if *b == flag),
            })
            .collect(),
        FieldKind::DateTime => DateFilter::ALL
            .iter()
            .map(|f| FilterChoice {
                value: f.param().to_string(),
                label: f.label().to_string(),
                selected: false,
            })
            .collect(),
        _ => Vec::new(),
    };

    FilterSpec {
        field: field.name(),
        label: field.label(),
        choices,
    }
}

#[derive(Debug, Serialize)]
pub struct ChangeFormView {
    pub model: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_on_site: Option<String>,
    #[serde(flatten)]
    pub form: ChangeForm,
}
