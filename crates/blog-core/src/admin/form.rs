//! Edit form layout: fieldsets, read-only fields and inline rows.

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::options::{AdminField, FieldMeta, InlineAdmin, ModelAdmin};

/// A record whose field values can be shown on an edit form.
pub trait FormRecord<F> {
    fn value(&self, field: F) -> Value;
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedField {
    #[serde(flatten)]
    pub meta: FieldMeta,
    pub value: Value,
    pub readonly: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedFieldset {
    pub name: Option<&'static str>,
    pub fields: Vec<RenderedField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineRow {
    pub id: Uuid,
    pub fields: Vec<RenderedField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedInline {
    #[serde(flatten)]
    pub admin: InlineAdmin,
    pub rows: Vec<InlineRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangeForm {
    pub fieldsets: Vec<RenderedFieldset>,
    /// Read-only fields that no fieldset places.
    pub readonly: Vec<RenderedField>,
    pub inlines: Vec<RenderedInline>,
}

impl<F: AdminField> ModelAdmin<F> {
    /// Lay out the edit form for an existing record.
    ///
    /// Inline sections are returned empty; fill their rows with
    /// [`render_inline`].
    pub fn change_form(&self, record: &impl FormRecord<F>) -> ChangeForm {
        self.layout(|field| record.value(field))
    }

    /// Lay out the blank form used to add a record.
    pub fn add_form(&self) -> ChangeForm {
        self.layout(|_| Value::Null)
    }

    /// Without declared fieldsets every editable column goes into one
    /// unnamed fieldset.
    fn layout(&self, value_of: impl Fn(F) -> Value) -> ChangeForm {
        let render = |field: F| RenderedField {
            meta: field.meta(),
            value: value_of(field),
            readonly: self.is_readonly(field),
        };

        let fieldsets = if self.fieldsets.is_empty() {
            vec![RenderedFieldset {
                name: None,
                fields: F::all()
                    .iter()
                    .copied()
                    .filter(|f| !f.is_lookup() && !self.is_readonly(*f))
                    .map(render)
                    .collect(),
            }]
        } else {
            self.fieldsets
                .iter()
                .map(|fs| RenderedFieldset {
                    name: fs.name,
                    fields: fs.fields.iter().copied().map(render).collect(),
                })
                .collect()
        };

        let placed = |field: &F| self.fieldsets.iter().any(|fs| fs.fields.contains(field));
        let readonly = self
            .readonly_fields
            .iter()
            .filter(|f| !placed(f))
            .copied()
            .map(render)
            .collect();

        let inlines = self
            .inlines
            .iter()
            .map(|admin| RenderedInline {
                admin: admin.clone(),
                rows: Vec::new(),
            })
            .collect();

        ChangeForm {
            fieldsets,
            readonly,
            inlines,
        }
    }
}

/// Render child records as rows of an inline section.
pub fn render_inline<C, R>(
    admin: &InlineAdmin,
    records: &[R],
    pk: impl Fn(&R) -> Uuid,
) -> RenderedInline
where
    C: AdminField,
    R: FormRecord<C>,
{
    let rows = records
        .iter()
        .map(|record| InlineRow {
            id: pk(record),
            fields: admin
                .fields
                .iter()
                .filter_map(|meta| C::from_name(meta.name))
                .map(|field| RenderedField {
                    meta: field.meta(),
                    value: record.value(field),
                    readonly: admin.is_readonly(field.name()),
                })
                .collect(),
        })
        .collect();

    RenderedInline {
        admin: admin.clone(),
        rows,
    }
}
